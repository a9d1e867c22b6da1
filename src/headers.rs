use http_client::Request;

/// Add headers shared by every API call
pub fn add_common_headers(request: &mut Request, user_agent: &str) {
    let _ = request.insert_header("User-Agent", user_agent);
    let _ = request.insert_header("Accept", "application/json");
    let _ = request.insert_header("Connection", "keep-alive");
}

/// Add headers for write calls, which carry their parameters as a form body
pub fn add_form_headers(request: &mut Request, user_agent: &str) {
    add_common_headers(request, user_agent);
    let _ = request.insert_header(
        "Content-Type",
        "application/x-www-form-urlencoded;charset=UTF-8",
    );
}
