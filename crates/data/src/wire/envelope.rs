use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Generic response wrapper shared by every API endpoint, demo or remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Epoch milliseconds at which the response was produced.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationDto>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `data`.
    #[must_use]
    pub fn ok(data: T, message: impl Into<String>, timestamp: i64) -> Self {
        Self {
            success: true,
            status_code: 200,
            message: Some(message.into()),
            data: Some(data),
            timestamp,
            pagination: None,
        }
    }

    /// Failure envelope with no payload.
    #[must_use]
    pub fn failure(status_code: u16, message: impl Into<String>, timestamp: i64) -> Self {
        Self {
            success: false,
            status_code,
            message: Some(message.into()),
            data: None,
            timestamp,
            pagination: None,
        }
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationDto) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Unwrap the payload, turning failure envelopes into `DataError`.
    ///
    /// A 404 envelope maps to `DataError::NotFound`; any other failure (or a
    /// success flag with a missing payload) maps to `DataError::Api`.
    ///
    /// # Errors
    ///
    /// Returns `DataError` when the envelope does not carry a payload.
    pub fn into_data(self) -> Result<(T, Option<PaginationDto>), DataError> {
        if self.status_code == 404 {
            return Err(DataError::NotFound);
        }
        let message = self.message.unwrap_or_else(|| "request failed".into());
        if !self.success {
            return Err(DataError::Api {
                status: self.status_code,
                message,
            });
        }
        match self.data {
            Some(data) => Ok((data, self.pagination)),
            None => Err(DataError::Api {
                status: self.status_code,
                message: "missing payload".into(),
            }),
        }
    }
}

/// Pagination metadata for paginated responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationDto {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_payload() {
        let response = ApiResponse::ok(vec![1, 2, 3], "fetched", 1_700_000_000_000);
        let (data, pagination) = response.into_data().unwrap();
        assert_eq!(data, vec![1, 2, 3]);
        assert!(pagination.is_none());
    }

    #[test]
    fn not_found_envelope_maps_to_not_found() {
        let response = ApiResponse::<()>::failure(404, "Contest not found", 0);
        assert!(matches!(response.into_data(), Err(DataError::NotFound)));
    }

    #[test]
    fn failure_envelope_maps_to_api_error() {
        let response = ApiResponse::<()>::failure(500, "boom", 0);
        match response.into_data() {
            Err(DataError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn success_without_payload_is_api_error() {
        let response = ApiResponse::<u32> {
            success: true,
            status_code: 200,
            message: None,
            data: None,
            timestamp: 0,
            pagination: None,
        };
        assert!(matches!(response.into_data(), Err(DataError::Api { .. })));
    }

    #[test]
    fn deserializes_wire_shape() {
        let json = r#"{
            "success": true,
            "status_code": 200,
            "message": "ok",
            "data": 7,
            "timestamp": 1700000000000,
            "pagination": {
                "current_page": 1,
                "page_size": 10,
                "total_pages": 2,
                "total_items": 15,
                "has_next": true,
                "has_previous": false
            }
        }"#;
        let response: ApiResponse<u32> = serde_json::from_str(json).unwrap();
        let (data, pagination) = response.into_data().unwrap();
        assert_eq!(data, 7);
        assert!(pagination.unwrap().has_next);
    }
}
