//! Validate Promotion Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use davenport_app::domain::promotions::{
    PromotionsServiceError, records::PromotionQuote, validation::PromotionRejection,
};

use crate::{extensions::*, state::State};

/// Validate Promotion Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidatePromotionRequest {
    pub code: String,
    /// Candidate order subtotal the code is applied against
    pub total_amount: u64,
}

/// Validate Promotion Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidatePromotionResponse {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PromotionSummary>,

    pub message: String,
}

/// The applied promotion, echoed for display.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionSummary {
    pub code: String,
    pub kind: String,
    pub value: u64,
}

impl From<PromotionQuote> for ValidatePromotionResponse {
    fn from(quote: PromotionQuote) -> Self {
        Self {
            valid: true,
            discount: Some(quote.discount),
            promotion: Some(PromotionSummary {
                code: quote.code,
                kind: quote.kind.as_str().to_string(),
                value: quote.value,
            }),
            message: "Promotion applied".to_string(),
        }
    }
}

/// Validate Promotion Handler
///
/// Checks a discount code against a candidate subtotal and quotes the
/// discount it would grant.
#[endpoint(
    tags("promotions"),
    summary = "Validate Promotion",
    responses(
        (status_code = StatusCode::OK, description = "Code applies"),
        (status_code = StatusCode::BAD_REQUEST, description = "Code does not apply"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown or inactive code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ValidatePromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.code.trim().is_empty() {
        res.status_code(StatusCode::BAD_REQUEST);

        return Ok(Json(ValidatePromotionResponse {
            valid: false,
            discount: None,
            promotion: None,
            message: "Please enter a promotion code".to_string(),
        }));
    }

    match state
        .app
        .promotions
        .validate_code(&request.code, request.total_amount)
        .await
    {
        Ok(quote) => Ok(Json(quote.into())),
        Err(PromotionsServiceError::Rejected(rejection)) => {
            // Unknown codes are a 404 to the storefront; every other
            // rejection is a 400 with the reason.
            res.status_code(match rejection {
                PromotionRejection::UnknownCode => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_REQUEST,
            });

            Ok(Json(ValidatePromotionResponse {
                valid: false,
                discount: None,
                promotion: None,
                message: rejection.to_string(),
            }))
        }
        Err(error) => {
            error!("promotion validation failed: {error}");

            Err(StatusError::internal_server_error())
        }
    }
}
