use async_trait::async_trait;
use tracing::info;

use crate::domain::models::payment::{PaymentMethod, PaymentMethodPayload, PaymentReceipt, PaymentRequest};
use crate::domain::ports::PaymentApi;
use crate::error::AppError;
use crate::infra::http::backend::HttpBackend;

const METHODS: &str = "/api/metodos";

pub struct HttpPaymentApi {
    backend: HttpBackend,
}

impl HttpPaymentApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl PaymentApi for HttpPaymentApi {
    async fn list_methods(&self) -> Result<Vec<PaymentMethod>, AppError> {
        self.backend.get_json(METHODS).await
    }

    async fn find_method(&self, id: i64) -> Result<Option<PaymentMethod>, AppError> {
        self.backend.find_json(&format!("{}/{}", METHODS, id)).await
    }

    async fn create_method(&self, method: &PaymentMethodPayload) -> Result<PaymentMethod, AppError> {
        self.backend.post_json(METHODS, method).await
    }

    async fn update_method(&self, id: i64, method: &PaymentMethodPayload) -> Result<PaymentMethod, AppError> {
        self.backend.put_json(&format!("{}/{}", METHODS, id), method).await
    }

    async fn delete_method(&self, id: i64) -> Result<(), AppError> {
        self.backend.delete(&format!("{}/{}", METHODS, id)).await
    }

    async fn pay_reservation(&self, reservation_id: i64, payment: &PaymentRequest) -> Result<PaymentReceipt, AppError> {
        let receipt: PaymentReceipt = self
            .backend
            .post_json(&format!("/api/reservas/{}/pagar", reservation_id), payment)
            .await?;
        info!("Payment {} registered for reservation {}", receipt.id, reservation_id);
        Ok(receipt)
    }
}
