// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::transport::NoopTransport;

#[tokio::test]
async fn schedules_and_returns_call_id() {
    let tool = ScheduleCallTool::new(Arc::new(NoopTransport));
    let result = tool.execute(serde_json::json!({"to": "+15551234567", "at": Utc::now()})).await.unwrap();
    assert!(result["call_id"].is_string());
}
