use skiff::http::response::{Response, ResponseBuilder, StatusCode};
use skiff::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("Content-Encoding", "gzip")
        .header("Content-Length", 3)
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["Content-Type", "Content-Encoding", "Content-Length"]);
}

#[test]
fn test_response_builder_adds_no_implicit_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert!(response.headers.is_empty());
    assert!(response.body.is_empty());
}

#[test]
fn test_response_builder_content() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .content("text/plain", "héllo".as_bytes().to_vec())
        .build();

    assert_eq!(response.header("content-type"), Some("text/plain"));
    // byte length, not character count
    assert_eq!(response.header("Content-Length"), Some("6"));
}

#[test]
fn test_serialize_root_response() {
    let bytes = serialize_response(&Response::empty(StatusCode::Ok));
    assert_eq!(bytes, b"HTTP/1.1 200 OK\r\n\r\n".to_vec());
}

#[test]
fn test_serialize_not_found_response() {
    let bytes = serialize_response(&Response::not_found());
    assert_eq!(bytes, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[test]
fn test_serialize_response_with_body() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .content("text/plain", b"abc".to_vec())
        .build();

    assert_eq!(
        serialize_response(&response),
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc\r\n".to_vec()
    );
}

#[test]
fn test_serialize_is_idempotent() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .content("application/octet-stream", vec![0, 1, 2, 255])
        .build();

    assert_eq!(serialize_response(&response), serialize_response(&response));
}

#[test]
fn test_response_helpers() {
    assert_eq!(Response::bad_request().status, StatusCode::BadRequest);
    assert_eq!(Response::internal_error().status, StatusCode::InternalServerError);
    assert!(Response::internal_error().body.is_empty());
}
