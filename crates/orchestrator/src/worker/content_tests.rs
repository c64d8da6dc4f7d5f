// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn request() -> ContentRequest {
    ContentRequest {
        channel: "email".into(),
        stage_name: "intro".into(),
        actions: vec!["send_intro_message".into()],
        subject_context: serde_json::json!({"stage": "new"}),
    }
}

#[tokio::test]
async fn fake_generator_returns_fixed_body() {
    let generator = FakeContentGenerator::returning("hello there");
    let body = generator.generate(request()).await.unwrap();
    assert_eq!(body, "hello there");
}

#[tokio::test]
async fn fake_generator_surfaces_failure_as_transient() {
    let generator = FakeContentGenerator::failing("upstream unavailable");
    let err = generator.generate(request()).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::TransientToolError { .. }));
}
