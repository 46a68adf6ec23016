use mongodb::Database;
use rocket::serde::json::Json;
use rocket::State;
use utoipa::ToSchema;

use crate::data::payment::db::PaymentDbExt;
use crate::data::payment::Payment;
use crate::data::InsertedResponse;
use crate::payment::{to_minor_units, PaymentClient};
use crate::resp::guard::forbidden_problem;
use crate::resp::jwt::UserClaims;
use crate::resp::problem::Problem;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Open a payment intent with the processor and hand back its client secret.
#[utoipa::path(
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, body = PaymentIntentResponse),
        (status = 502, description = "Processor call failed", body = Problem),
    ),
    security(("jwt" = []))
)]
#[post("/create-payment-intent", format = "application/json", data = "<request>")]
#[tracing::instrument(skip(payments))]
pub async fn payment_intent_create(
    request: Json<PaymentIntentRequest>,
    _auth: UserClaims,
    payments: &State<PaymentClient>,
) -> Result<Json<PaymentIntentResponse>, Problem> {
    let intent = payments.create_intent(to_minor_units(request.price)).await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Record a completed payment as reported by the client. The record must
/// belong to the caller; nothing is verified against the processor.
#[utoipa::path(
    request_body = Payment,
    responses(
        (status = 200, body = InsertedResponse),
        (status = 403, description = "Record email differs from the token", body = Problem),
    ),
    security(("jwt" = []))
)]
#[post("/payments", format = "application/json", data = "<payment>")]
#[tracing::instrument]
pub async fn payment_create(
    payment: Json<Payment>,
    auth: UserClaims,
    db: &State<Database>,
) -> Result<Json<InsertedResponse>, Problem> {
    if payment.email != auth.email {
        return Err(forbidden_problem(
            "Payments can only be recorded for the caller's own account.",
        ));
    }

    Ok(Json(db.record_payment(payment.into_inner()).await?))
}

/// One user's payment history, newest first.
#[utoipa::path(responses((status = 200, body = Vec<Payment>)))]
#[get("/payments?<email>")]
#[tracing::instrument]
pub async fn payment_list(
    email: &str,
    db: &State<Database>,
) -> Result<Json<Vec<Payment>>, Problem> {
    Ok(Json(db.list_payments_for(email).await?))
}

///////////////////////
//       TESTS
///////////////////////
