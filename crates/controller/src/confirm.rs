//! Caller-supplied confirmation gate for destructive intents.

use async_trait::async_trait;

/// Asks whoever drives the controller whether to proceed.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Proceeds without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

/// Declines every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[async_trait]
impl Confirm for NeverConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Adapter turning a synchronous closure into a [`Confirm`].
#[derive(Debug, Clone, Copy)]
pub struct ConfirmWith<F>(pub F);

pub fn confirm_with<F>(f: F) -> ConfirmWith<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    ConfirmWith(f)
}

#[async_trait]
impl<F> Confirm for ConfirmWith<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn confirm(&self, prompt: &str) -> bool {
        (self.0)(prompt)
    }
}
