use async_trait::async_trait;
use base64::Engine;
use rand::Rng;
use uuid::Uuid;

/// A provisional hold on the customer's payment method. Held funds are only
/// taken on `capture`; `void` hands them back.
#[derive(Debug, Clone)]
pub struct PaymentAuthorization {
    pub reference: String,
    pub amount_cents: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// The gateway contract the booking flow depends on. Payment is provisional
/// around the slot reservation: authorize before the insert, capture after
/// it commits, void when the slot turns out to be taken.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn authorize(
        &self,
        token: &str,
        amount_cents: i64,
    ) -> Result<PaymentAuthorization, PaymentError>;

    async fn capture(&self, authorization: &PaymentAuthorization) -> Result<(), PaymentError>;

    async fn void(&self, authorization: &PaymentAuthorization) -> Result<(), PaymentError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    Approve,
    Decline,
    Offline,
}

impl PaymentMode {
    pub fn parse(s: &str) -> Self {
        match s {
            "decline" => PaymentMode::Decline,
            "offline" => PaymentMode::Offline,
            _ => PaymentMode::Approve,
        }
    }
}

/// Config-driven gateway. `approve` accepts any well-formed token, `decline`
/// rejects every charge, `offline` simulates an unreachable processor. The
/// real processor lives behind the same trait.
pub struct StaticGateway {
    mode: PaymentMode,
}

impl StaticGateway {
    pub fn new(mode: PaymentMode) -> Self {
        Self { mode }
    }

    pub fn from_config(payment_mode: &str) -> Self {
        Self::new(PaymentMode::parse(payment_mode))
    }

    // Tokens are opaque to us, but a token that is not even base64 never
    // came from the payment widget.
    fn token_is_well_formed(token: &str) -> bool {
        !token.is_empty()
            && base64::engine::general_purpose::STANDARD_NO_PAD
                .decode(token.trim_end_matches('='))
                .is_ok()
    }
}

#[async_trait]
impl PaymentGateway for StaticGateway {
    async fn authorize(
        &self,
        token: &str,
        amount_cents: i64,
    ) -> Result<PaymentAuthorization, PaymentError> {
        match self.mode {
            PaymentMode::Offline => {
                return Err(PaymentError::Unavailable("gateway offline".to_string()));
            }
            PaymentMode::Decline => {
                return Err(PaymentError::Declined("card declined".to_string()));
            }
            PaymentMode::Approve => {}
        }

        if !Self::token_is_well_formed(token) {
            return Err(PaymentError::Declined("malformed payment token".to_string()));
        }

        let nonce: u32 = rand::rng().random();
        let reference = format!("auth-{}-{:08x}", Uuid::new_v4().simple(), nonce);
        log::debug!("Authorized {} cents under {}", amount_cents, reference);

        Ok(PaymentAuthorization {
            reference,
            amount_cents,
        })
    }

    async fn capture(&self, authorization: &PaymentAuthorization) -> Result<(), PaymentError> {
        match self.mode {
            PaymentMode::Offline => Err(PaymentError::Unavailable("gateway offline".to_string())),
            _ => {
                log::debug!("Captured {}", authorization.reference);
                Ok(())
            }
        }
    }

    async fn void(&self, authorization: &PaymentAuthorization) -> Result<(), PaymentError> {
        log::debug!("Voided {}", authorization.reference);
        Ok(())
    }
}
