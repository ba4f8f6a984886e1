mod common;

use std::collections::HashSet;

use redraw_core::error::RedrawError;
use redraw_core::inpaint::{
    normalize_remote_error, user_message, InpaintRequest, InpaintResponse, InpaintingService,
    ValidatingService,
};
use redraw_core::io::image_io::encode_base64;
use redraw_core::params::ProcessingParams;

use common::{png_page, MockService};

fn valid_request() -> InpaintRequest {
    InpaintRequest {
        credential: "secret-key-abcdef".into(),
        image_base64: encode_base64(&png_page(8, 8)),
        mask_base64: Some(encode_base64(&png_page(8, 8))),
        mime_type: "image/png".into(),
        model_id: Some("gemini-2.5-flash-image".into()),
        params: Some(ProcessingParams::default()),
    }
}

// ---------------------------------------------------------------------------
// Boundary validation
// ---------------------------------------------------------------------------

#[test]
fn test_valid_request_passes() {
    valid_request().validate().unwrap();
    let minimal = InpaintRequest {
        mask_base64: None,
        model_id: None,
        params: None,
        ..valid_request()
    };
    minimal.validate().unwrap();
}

#[test]
fn test_each_rejection_has_its_own_message() {
    let mut params = ProcessingParams::default();
    params.denoising_strength = 1.5;

    let bad = [
        InpaintRequest {
            credential: "  ".into(),
            ..valid_request()
        },
        InpaintRequest {
            image_base64: String::new(),
            ..valid_request()
        },
        InpaintRequest {
            mask_base64: Some("not base64!!".into()),
            ..valid_request()
        },
        InpaintRequest {
            mime_type: "image/gif".into(),
            ..valid_request()
        },
        InpaintRequest {
            params: Some(params),
            ..valid_request()
        },
    ];

    let messages: Vec<String> = bad
        .iter()
        .map(|r| r.validate().unwrap_err().to_string())
        .collect();
    let unique: HashSet<&String> = messages.iter().collect();
    assert_eq!(unique.len(), messages.len(), "{:?}", messages);

    assert!(matches!(bad[0].validate(), Err(RedrawError::MissingCredential)));
    assert!(messages[1].contains("image"));
    assert!(messages[2].contains("mask"));
    assert!(matches!(
        bad[3].validate(),
        Err(RedrawError::UnsupportedMimeType(_))
    ));
    assert!(matches!(bad[4].validate(), Err(RedrawError::InvalidParams(_))));
}

#[test]
fn test_validating_service_shields_inner() {
    let service = ValidatingService::new(MockService::succeeding());
    let bad = InpaintRequest {
        credential: String::new(),
        ..valid_request()
    };
    assert!(service.inpaint(&bad).is_err());
    assert_eq!(service.inner().calls(), 0);

    let response = service.inpaint(&valid_request()).unwrap();
    assert!(response.success);
    assert_eq!(service.inner().calls(), 1);
    assert_eq!(service.name(), "mock");
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[test]
fn test_request_json_field_names() {
    let json = serde_json::to_value(valid_request()).unwrap();
    for key in ["apiKey", "image", "mask", "mimeType", "model", "params"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    let minimal = InpaintRequest {
        mask_base64: None,
        ..valid_request()
    };
    let json = serde_json::to_value(minimal).unwrap();
    assert!(json.get("mask").is_none());
}

#[test]
fn test_debug_and_redacted_hide_credential() {
    let request = valid_request();
    let debug = format!("{:?}", request);
    assert!(!debug.contains("secret-key-abcdef"));
    assert!(debug.contains("<redacted>"));

    let redacted = request.redacted();
    assert_eq!(redacted.credential, "secr...cdef");
    assert_eq!(redacted.image_base64, request.image_base64);
}

#[test]
fn test_request_payload_accessors() {
    let request = valid_request();
    assert_eq!(request.image_bytes().unwrap(), png_page(8, 8));
    assert!(request.mask_bytes().unwrap().is_some());
    assert_eq!(request.image_mime().unwrap().as_str(), "image/png");
}

// ---------------------------------------------------------------------------
// Responses and messages
// ---------------------------------------------------------------------------

#[test]
fn test_response_into_result() {
    assert_eq!(
        InpaintResponse::success("AAAA").into_result().unwrap(),
        "AAAA"
    );

    let err = InpaintResponse::failure("Model overloaded")
        .into_result()
        .unwrap_err();
    assert_eq!(err.to_string(), "Model overloaded");

    let no_image = InpaintResponse {
        success: true,
        ..InpaintResponse::default()
    };
    assert!(no_image
        .into_result()
        .unwrap_err()
        .to_string()
        .contains("No image data"));

    let silent_failure = InpaintResponse::default();
    assert_eq!(
        silent_failure.into_result().unwrap_err().to_string(),
        "Failed to process image"
    );
}

#[test]
fn test_response_json() {
    let response: InpaintResponse =
        serde_json::from_str(r#"{"success":true,"processedImage":"QUJD"}"#).unwrap();
    assert_eq!(response.processed_image.as_deref(), Some("QUJD"));
    assert!(response.error.is_none());
}

#[test]
fn test_remote_error_normalisation() {
    let key = normalize_remote_error("API key not valid. Please pass a valid API key.");
    assert_eq!(
        key.to_string(),
        "Invalid API key. Please check your Gemini API key."
    );
    let quota = normalize_remote_error("Resource exhausted: quota exceeded for project");
    assert_eq!(
        quota.to_string(),
        "API quota exceeded. Please check your Gemini API usage."
    );
    let other = normalize_remote_error("model is overloaded");
    assert_eq!(other.to_string(), "Gemini API error: model is overloaded");
    assert_eq!(
        normalize_remote_error("").to_string(),
        "Failed to process image"
    );
}

#[test]
fn test_user_message_passes_collaborator_text_through() {
    let err = RedrawError::Collaborator("API quota exceeded.".into());
    assert_eq!(user_message(&err), "API quota exceeded.");
    assert_eq!(
        user_message(&RedrawError::MissingMask),
        "Please draw a mask over the text areas to remove"
    );
}
