use axum::{http::StatusCode, response::IntoResponse};
use nailsync_api::middleware::error_handling::AppError;
use nailsync_core::errors::CrmError;
use rstest::rstest;

#[rstest]
#[case(CrmError::NotFound("Appointment not found".to_string()), StatusCode::NOT_FOUND)]
#[case(CrmError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(CrmError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    CrmError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: CrmError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_eyre_report_maps_to_database_error() {
    let error: AppError = eyre::eyre!("connection refused").into();

    assert!(matches!(error.0, CrmError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
