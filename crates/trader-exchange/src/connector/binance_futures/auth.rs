//! 요청 서명.
//!
//! Binance는 쿼리 문자열 전체에 대한 HMAC-SHA256 서명을 요구합니다.
//! 서명 검증은 파라미터 순서에 민감하므로 인코딩은 전달받은 순서를 그대로 유지합니다.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{ExchangeError, ExchangeResult};

type HmacSha256 = Hmac<Sha256>;

/// 서명된 요청.
///
/// 호출마다 새로 생성되며 재사용하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// `timestamp`가 추가된 파라미터 (전달 순서 유지)
    pub params: Vec<(String, String)>,
    /// URL 인코딩된 정규 쿼리 문자열
    pub query: String,
    /// 소문자 16진수 서명
    pub signature: String,
}

impl SignedRequest {
    /// 주입된 타임스탬프 값.
    pub fn timestamp(&self) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == "timestamp")
            .map(|(_, v)| v.as_str())
    }

    /// `<base_url><endpoint>?<query>&signature=<signature>` 형태의 최종 URL.
    pub fn url(&self, base_url: &str, endpoint: &str) -> String {
        format!(
            "{}{}?{}&signature={}",
            base_url, endpoint, self.query, self.signature
        )
    }
}

/// HMAC-SHA256 요청 서명기.
pub struct RequestSigner<'a> {
    secret: &'a str,
}

impl<'a> RequestSigner<'a> {
    /// 시크릿으로 서명기 생성.
    pub fn new(secret: &'a str) -> Self {
        Self { secret }
    }

    /// 쿼리 문자열에 대한 HMAC-SHA256 서명 (소문자 hex).
    pub fn sign(&self, query: &str) -> ExchangeResult<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| ExchangeError::Configuration(format!("invalid signing key: {}", e)))?;
        mac.update(query.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// 파라미터 끝에 `timestamp`를 붙이고 인코딩 후 서명.
    pub fn sign_params(
        &self,
        params: &[(&str, String)],
        timestamp_ms: u64,
    ) -> ExchangeResult<SignedRequest> {
        let mut all_params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        all_params.push(("timestamp".to_string(), timestamp_ms.to_string()));

        let query = encode_query(&all_params)?;
        let signature = self.sign(&query)?;

        Ok(SignedRequest {
            params: all_params,
            query,
            signature,
        })
    }
}

/// 순서를 유지하는 form URL 인코딩.
pub fn encode_query(params: &[(String, String)]) -> ExchangeResult<String> {
    serde_urlencoded::to_string(params).map_err(|e| ExchangeError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Binance API 문서의 서명 예제
    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const DOC_QUERY: &str = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
    const DOC_SIGNATURE: &str = "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71";

    #[test]
    fn test_sign_matches_documented_vector() {
        let signer = RequestSigner::new(DOC_SECRET);
        assert_eq!(signer.sign(DOC_QUERY).unwrap(), DOC_SIGNATURE);
    }

    #[test]
    fn test_sign_params_builds_documented_query() {
        let signer = RequestSigner::new(DOC_SECRET);
        let params = vec![
            ("symbol", "LTCBTC".to_string()),
            ("side", "BUY".to_string()),
            ("type", "LIMIT".to_string()),
            ("timeInForce", "GTC".to_string()),
            ("quantity", "1".to_string()),
            ("price", "0.1".to_string()),
            ("recvWindow", "5000".to_string()),
        ];

        let signed = signer.sign_params(&params, 1_499_827_319_559).unwrap();

        assert_eq!(signed.query, DOC_QUERY);
        assert_eq!(signed.signature, DOC_SIGNATURE);
        assert_eq!(signed.timestamp(), Some("1499827319559"));
    }

    #[test]
    fn test_sign_matches_independent_hmac() {
        let secret = "test_secret";
        let query = "symbol=BTCUSDT&side=SELL&type=MARKET&quantity=0.5&timestamp=1700000000000";

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(query.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        let signature = RequestSigner::new(secret).sign(query).unwrap();
        assert_eq!(signature, expected);
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_params_preserves_order() {
        let signer = RequestSigner::new("secret");
        let params = vec![
            ("type", "MARKET".to_string()),
            ("symbol", "ETHUSDT".to_string()),
            ("quantity", "2".to_string()),
        ];

        let signed = signer.sign_params(&params, 42).unwrap();

        assert_eq!(
            signed.query,
            "type=MARKET&symbol=ETHUSDT&quantity=2&timestamp=42"
        );
        let keys: Vec<_> = signed.params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["type", "symbol", "quantity", "timestamp"]);
    }

    #[test]
    fn test_sign_params_form_encodes_values() {
        let signer = RequestSigner::new("secret");
        let params = vec![("note", "a b&c=d".to_string())];

        let signed = signer.sign_params(&params, 1).unwrap();

        assert_eq!(signed.query, "note=a+b%26c%3Dd&timestamp=1");
        assert_eq!(signed.signature, signer.sign(&signed.query).unwrap());
    }

    #[test]
    fn test_url_appends_signature_last() {
        let signer = RequestSigner::new("secret");
        let signed = signer
            .sign_params(&[("symbol", "BTCUSDT".to_string())], 7)
            .unwrap();

        let url = signed.url("http://localhost:8080", "/fapi/v1/order");
        assert_eq!(
            url,
            format!(
                "http://localhost:8080/fapi/v1/order?symbol=BTCUSDT&timestamp=7&signature={}",
                signed.signature
            )
        );
    }

    #[test]
    fn test_different_timestamps_produce_different_signatures() {
        let signer = RequestSigner::new("secret");
        let params = vec![("symbol", "BTCUSDT".to_string())];

        let first = signer.sign_params(&params, 1_000).unwrap();
        let second = signer.sign_params(&params, 1_001).unwrap();

        assert_ne!(first.signature, second.signature);
    }
}
