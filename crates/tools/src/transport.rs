// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seam between the communication builtins and an actual vendor transport.
//! Concrete vendor I/O (SES/SuprSend/Twilio) is out of scope; production
//! wiring plugs a real client in here, test code uses [`NoopTransport`].

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// A single delivered-message acknowledgement (provider message id).
pub struct DeliveryReceipt {
    pub provider_message_id: String,
    pub provider: String,
}

#[async_trait]
pub trait ChannelTransport: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<DeliveryReceipt, TransportError>;
    async fn send_whatsapp(&self, to: &str, message: &str) -> Result<DeliveryReceipt, TransportError>;
    async fn send_sms(&self, to: &str, message: &str) -> Result<DeliveryReceipt, TransportError>;
    async fn schedule_call(&self, to: &str, at: chrono::DateTime<chrono::Utc>) -> Result<DeliveryReceipt, TransportError>;
}

/// Always-succeeds transport for tests and local development.
pub struct NoopTransport;

#[async_trait]
impl ChannelTransport for NoopTransport {
    async fn send_email(&self, _to: &str, _subject: &str, _body: &str) -> Result<DeliveryReceipt, TransportError> {
        Ok(DeliveryReceipt { provider_message_id: "noop-email".into(), provider: "noop".into() })
    }

    async fn send_whatsapp(&self, _to: &str, _message: &str) -> Result<DeliveryReceipt, TransportError> {
        Ok(DeliveryReceipt { provider_message_id: "noop-whatsapp".into(), provider: "noop".into() })
    }

    async fn send_sms(&self, _to: &str, _message: &str) -> Result<DeliveryReceipt, TransportError> {
        Ok(DeliveryReceipt { provider_message_id: "noop-sms".into(), provider: "noop".into() })
    }

    async fn schedule_call(&self, _to: &str, _at: chrono::DateTime<chrono::Utc>) -> Result<DeliveryReceipt, TransportError> {
        Ok(DeliveryReceipt { provider_message_id: "noop-call".into(), provider: "noop".into() })
    }
}
