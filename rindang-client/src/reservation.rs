//! Reservation API

use crate::{ClientResult, HttpClient};
use serde::Deserialize;
use shared::models::{CreateReservationRequest, Reservation};

/// `POST /reservation/confirm/{id}` answers `{reservation, invoice}`
#[derive(Deserialize)]
struct Confirmation {
    reservation: Reservation,
}

impl HttpClient {
    /// List reservations (staff)
    pub async fn list_reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.get("reservation/").await
    }

    /// Create a reservation (public)
    pub async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> ClientResult<Reservation> {
        self.post("reservation/", request).await
    }

    /// Mark a reservation paid
    pub async fn confirm_reservation(&self, id: i64) -> ClientResult<Reservation> {
        let confirmation: Confirmation = self
            .post_empty(&format!("reservation/confirm/{}", id))
            .await?;
        Ok(confirmation.reservation)
    }
}
