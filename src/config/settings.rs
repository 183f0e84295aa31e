//! 应用配置加载和管理

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;

/// 应用配置结构
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

/// 上游光伏监控 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    /// 上游主机地址（不带结尾斜杠）
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 被监控电站的设备 ID
    #[serde(default = "default_device_id")]
    pub device_id: String,
    #[serde(default)]
    pub tls: TlsSettings,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            device_id: default_device_id(),
            tls: TlsSettings::default(),
        }
    }
}

fn default_base_url() -> String { "https://pvcheck.havells.com".to_string() }
fn default_device_id() -> String { "63295957".to_string() }

/// 上游证书信任模式
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TlsMode {
    /// 标准证书链校验
    #[default]
    Verify,
    /// 仅信任指定 CA 证书
    CaCert,
    /// 固定叶子证书 SHA-256 指纹
    Pinned,
    /// 接受任意证书（仅用于排障）
    Insecure,
}

impl TlsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsMode::Verify => "verify",
            TlsMode::CaCert => "ca_cert",
            TlsMode::Pinned => "pinned",
            TlsMode::Insecure => "insecure",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TlsSettings {
    #[serde(default)]
    pub mode: TlsMode,
    /// 十六进制 SHA-256 指纹，允许 `:` 分隔
    #[serde(default)]
    pub pinned_sha256: Option<String>,
    /// PEM 格式 CA 证书路径
    #[serde(default)]
    pub ca_cert_path: Option<String>,
}

/// 仪表盘聚合配置
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    /// 时间标签使用的时区（IANA 名称）
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// 活跃判断检查的最近记录条数
    #[serde(default = "default_activity_window")]
    pub activity_window: usize,
    /// 实时视图刷新间隔（秒）
    #[serde(default = "default_live_refresh")]
    pub live_refresh_seconds: u64,
    /// 按日期视图刷新间隔（秒），仅当查看当天时生效
    #[serde(default = "default_dated_refresh")]
    pub dated_refresh_seconds: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            activity_window: default_activity_window(),
            live_refresh_seconds: default_live_refresh(),
            dated_refresh_seconds: default_dated_refresh(),
        }
    }
}

fn default_timezone() -> String { "UTC".to_string() }
fn default_activity_window() -> usize { 10 }
fn default_live_refresh() -> u64 { 60 }
fn default_dated_refresh() -> u64 { 300 }

impl DashboardSettings {
    /// 解析配置的时区，无法识别时回退到 UTC
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %self.timezone, "无法识别的时区，使用 UTC");
            chrono_tz::UTC
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Settings {
    /// 从配置文件和环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let settings = Config::builder()
            // 加载默认配置
            .add_source(File::with_name("config/development"))
            // 根据环境加载对应配置
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // 环境变量覆盖，前缀 HELIANTHUS，分隔符 __
            .add_source(
                Environment::with_prefix("HELIANTHUS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// 获取上游 API Bearer 令牌（从环境变量）
    ///
    /// 优先读取 `SOLAR_API_TOKEN`，兼容旧部署的 `TOKEN`
    pub fn api_token() -> Option<SecretString> {
        env::var("SOLAR_API_TOKEN")
            .or_else(|_| env::var("TOKEN"))
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::new)
    }

    /// 获取服务器地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
