//! 上游 HTTPS 信任配置
//!
//! 上游使用自签名证书。信任例外只作用于上游客户端本身，不影响进程内其他 TLS 连接。

use crate::config::{TlsMode, TlsSettings};
use crate::errors::AppError;
use rustls::client::{ServerCertVerified, ServerCertVerifier};
use rustls::{Certificate, ClientConfig, ServerName};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::SystemTime;

/// 解析 SHA-256 指纹，允许 `:` 分隔和大小写混用
pub fn parse_fingerprint(s: &str) -> Result<[u8; 32], AppError> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != ':' && !c.is_whitespace())
        .collect();

    let bytes = hex::decode(&cleaned)
        .map_err(|e| AppError::ConfigError(format!("无效的证书指纹格式: {}", e)))?;

    bytes
        .try_into()
        .map_err(|_| AppError::ConfigError("证书指纹必须是 32 字节 SHA-256".to_string()))
}

/// 只接受指纹匹配的叶子证书
///
/// 跳过证书链与主机名校验，握手签名仍按 rustls 默认流程校验
pub struct PinnedCertVerifier {
    fingerprint: [u8; 32],
}

impl PinnedCertVerifier {
    pub fn new(fingerprint: [u8; 32]) -> Self {
        Self { fingerprint }
    }
}

impl ServerCertVerifier for PinnedCertVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        let digest = Sha256::digest(&end_entity.0);
        if digest.as_slice() == self.fingerprint.as_slice() {
            Ok(ServerCertVerified::assertion())
        } else {
            tracing::error!(
                presented = %hex::encode(digest),
                "上游证书指纹不匹配"
            );
            Err(rustls::Error::General(
                "upstream certificate fingerprint mismatch".to_string(),
            ))
        }
    }
}

/// 按配置构建上游 HTTP 客户端
pub fn build_upstream_client(tls: &TlsSettings) -> Result<reqwest::Client, AppError> {
    let builder = reqwest::Client::builder()
        .user_agent(concat!("helianthus/", env!("CARGO_PKG_VERSION")));

    let builder = match tls.mode {
        TlsMode::Verify => builder,
        TlsMode::CaCert => {
            let path = tls.ca_cert_path.as_deref().ok_or_else(|| {
                AppError::ConfigError("ca_cert 模式需要配置 ca_cert_path".to_string())
            })?;
            let pem = std::fs::read(path).map_err(|e| {
                AppError::ConfigError(format!("无法读取 CA 证书 {}: {}", path, e))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| AppError::ConfigError(format!("无效的 CA 证书: {}", e)))?;

            builder
                .tls_built_in_root_certs(false)
                .add_root_certificate(cert)
        }
        TlsMode::Pinned => {
            let fingerprint = tls
                .pinned_sha256
                .as_deref()
                .ok_or_else(|| {
                    AppError::ConfigError("pinned 模式需要配置 pinned_sha256".to_string())
                })
                .and_then(parse_fingerprint)?;

            let config = ClientConfig::builder()
                .with_safe_defaults()
                .with_custom_certificate_verifier(Arc::new(PinnedCertVerifier::new(fingerprint)))
                .with_no_client_auth();

            builder.use_preconfigured_tls(config)
        }
        TlsMode::Insecure => {
            tracing::warn!("⚠️ 上游证书校验已关闭（insecure 模式），仅用于排障");
            builder.danger_accept_invalid_certs(true)
        }
    };

    builder
        .build()
        .map_err(|e| AppError::ConfigError(format!("上游 HTTP 客户端初始化失败: {}", e)))
}
