use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha1::Sha1;
use uuid::Uuid;

use crate::auth::token::TokenPair;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

type HmacSha1 = Hmac<Sha1>;

/// Everything that goes into one OAuth 1.0a signature.
pub struct OAuthRequest<'a> {
    pub method: &'a str,
    pub url: &'a Url,
    pub consumer: &'a TokenPair,
    pub token: Option<&'a TokenPair>,
    /// Protocol parameters beyond the standard set, e.g. `oauth_callback`.
    pub extra: &'a [(&'a str, &'a str)],
}

/// RFC 3986 encoding: everything but unreserved characters is escaped.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Scheme, host, non-default port and path, without query or fragment.
pub fn base_string_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    format!("{}://{}{}{}", url.scheme(), host, port, url.path())
}

/// Encode, sort and join request parameters.
pub fn normalize_parameters(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&base_string_uri(url)),
        percent_encode(&normalize_parameters(params))
    )
}

/// HMAC-SHA1 over the base string, Base64 encoded.
pub fn compute_signature(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base_string.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Build the `Authorization` header value for a request with a fixed nonce
/// and timestamp.
pub fn authorization_header_with(request: &OAuthRequest<'_>, nonce: &str, timestamp: &str) -> String {
    let mut oauth_params: Vec<(String, String)> = vec![
        ("oauth_consumer_key".into(), request.consumer.key.clone()),
        ("oauth_nonce".into(), nonce.into()),
        ("oauth_signature_method".into(), SIGNATURE_METHOD.into()),
        ("oauth_timestamp".into(), timestamp.into()),
        ("oauth_version".into(), OAUTH_VERSION.into()),
    ];
    if let Some(token) = request.token {
        oauth_params.push(("oauth_token".into(), token.key.clone()));
    }
    for (k, v) in request.extra {
        oauth_params.push(((*k).into(), (*v).into()));
    }

    // The query string is signed alongside the protocol parameters.
    let mut all_params = oauth_params.clone();
    all_params.extend(
        request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned())),
    );

    let base = signature_base_string(request.method, request.url, &all_params);
    let token_secret = request.token.map(|t| t.secret.as_str()).unwrap_or_default();
    let signature = compute_signature(&base, &request.consumer.secret, token_secret);
    oauth_params.push(("oauth_signature".into(), signature));
    oauth_params.sort();

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {}", fields)
}

/// Build the `Authorization` header value with a fresh nonce and the
/// current time.
pub fn authorization_header(request: &OAuthRequest<'_>) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    authorization_header_with(request, &nonce, &timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos_url() -> Url {
        Url::parse("http://photos.example.net/photos?file=vacation.jpg&size=original").unwrap()
    }

    fn photos_params() -> Vec<(String, String)> {
        [
            ("file", "vacation.jpg"),
            ("size", "original"),
            ("oauth_consumer_key", "dpf43f3p2l4k3l03"),
            ("oauth_token", "nnch734d00sl2jdk"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1191242096"),
            ("oauth_nonce", "kllo9940pd9333jh"),
            ("oauth_version", "1.0"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_percent_encode_reserved_characters() {
        assert_eq!(percent_encode("abc-._~123"), "abc-._~123");
        assert_eq!(percent_encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(percent_encode("http://x/"), "http%3A%2F%2Fx%2F");
    }

    #[test]
    fn test_base_string_uri_drops_query_and_default_port() {
        let url = Url::parse("HTTP://Api.Telldus.com:80/json/device/info?id=1").unwrap();
        assert_eq!(base_string_uri(&url), "http://api.telldus.com/json/device/info");

        let url = Url::parse("http://127.0.0.1:8080/json/devices/list").unwrap();
        assert_eq!(base_string_uri(&url), "http://127.0.0.1:8080/json/devices/list");
    }

    #[test]
    fn test_signature_base_string_reference_example() {
        let base = signature_base_string("GET", &photos_url(), &photos_params());
        assert_eq!(
            base,
            "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg\
             %26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh\
             %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096\
             %26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
        );
    }

    #[test]
    fn test_compute_signature_reference_example() {
        let base = signature_base_string("GET", &photos_url(), &photos_params());
        let signature = compute_signature(&base, "kd94hf93k423kf44", "pfkkdhi9sl3r4s00");
        assert_eq!(signature, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
    }

    #[test]
    fn test_authorization_header_reference_example() {
        let url = photos_url();
        let consumer = TokenPair::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");
        let token = TokenPair::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
        let request = OAuthRequest {
            method: "GET",
            url: &url,
            consumer: &consumer,
            token: Some(&token),
            extra: &[],
        };

        let header = authorization_header_with(&request, "kllo9940pd9333jh", "1191242096");

        assert!(header.starts_with("OAuth oauth_consumer_key=\"dpf43f3p2l4k3l03\""));
        assert!(header.contains("oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\""));
        assert!(header.contains("oauth_token=\"nnch734d00sl2jdk\""));
        assert!(!header.contains("file="));
    }

    #[test]
    fn test_header_without_token_carries_extras() {
        let url = Url::parse("http://api.telldus.com/oauth/requestToken").unwrap();
        let consumer = TokenPair::new("key", "secret");
        let request = OAuthRequest {
            method: "GET",
            url: &url,
            consumer: &consumer,
            token: None,
            extra: &[("oauth_callback", "oob")],
        };

        let header = authorization_header(&request);

        assert!(header.contains("oauth_callback=\"oob\""));
        assert!(!header.contains("oauth_token="));
    }

    #[test]
    fn test_fresh_nonce_per_header() {
        let url = Url::parse("http://api.telldus.com/json/devices/list").unwrap();
        let consumer = TokenPair::new("key", "secret");
        let request = OAuthRequest {
            method: "GET",
            url: &url,
            consumer: &consumer,
            token: None,
            extra: &[],
        };
        assert_ne!(authorization_header(&request), authorization_header(&request));
    }
}
