use http_client::Request;

/// Desktop Chrome user agent; the archive serves a stripped page to unknown agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Add browser-like headers to a show page request
pub fn add_page_headers(request: &mut Request, referer_url: Option<&str>) {
    let _ = request.insert_header("User-Agent", USER_AGENT);
    let _ = request.insert_header("Accept", ACCEPT_HTML);
    let _ = request.insert_header("Accept-Language", "en-US,en;q=0.9");
    let _ = request.insert_header("DNT", "1");
    let _ = request.insert_header("Connection", "keep-alive");
    let _ = request.insert_header("Upgrade-Insecure-Requests", "1");

    if let Some(referer) = referer_url {
        let _ = request.insert_header("Referer", referer);
    }
}
