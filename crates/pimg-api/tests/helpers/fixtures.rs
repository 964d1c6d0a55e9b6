use axum_test::multipart::{MultipartForm, Part};
use serde_json::json;

pub const TEST_TOKEN: &str = "ghp_integration_token";

/// 1x1 transparent PNG.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn image_part(bytes: Vec<u8>, file_name: &str, mime_type: &str) -> Part {
    Part::bytes(bytes).file_name(file_name).mime_type(mime_type)
}

/// Upload form with a PNG image and the token; add further fields as needed.
pub fn png_upload_form() -> MultipartForm {
    MultipartForm::new()
        .add_part("image", image_part(create_minimal_png(), "screenshot.png", "image/png"))
        .add_text("githubAccessToken", TEST_TOKEN)
}

/// `GET /gists/{id}` body holding one envelope file.
pub fn gist_body(gist_id: &str, file_name: &str, envelope: &serde_json::Value) -> String {
    json!({
        "id": gist_id,
        "public": false,
        "files": {
            file_name: {
                "filename": file_name,
                "type": "text/plain",
                "content": envelope.to_string(),
                "truncated": false
            }
        }
    })
    .to_string()
}
