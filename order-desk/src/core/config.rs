use crate::export::ExportFormat;
use chrono_tz::Tz;
use std::time::Duration;

/// 订单台配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | CATALOG_PATH | data/catalog.json | 商品目录文件 |
/// | EXPORT_DIR | exports | 导出表格保存目录 |
/// | EXPORT_FORMAT | xlsx | 导出格式 (xlsx / csv) |
/// | RELAY_CONTACT | +923403004201 | 订单转发联系人 |
/// | RELAY_BASE_URL | https://wa.me | 转发链接前缀 |
/// | NOTIFICATION_TTL_MS | 3000 | 通知显示时长(毫秒) |
/// | SEARCH_LIMIT | 5 | 搜索建议最大条数 |
/// | TIMEZONE | UTC | 导出日期/时间列使用的时区 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录 |
///
/// # 示例
///
/// ```ignore
/// CATALOG_PATH=/data/medicines.json RELAY_CONTACT="+44 7700 900123" cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 商品目录 JSON 文件路径
    pub catalog_path: String,
    /// 导出文件保存目录
    pub export_dir: String,
    /// 导出格式 (无法识别时回退到 xlsx)
    pub export_format: ExportFormat,
    /// 转发联系人 (手机号，空白字符会被去掉)
    pub relay_contact: String,
    /// 转发链接前缀
    pub relay_base_url: String,
    /// 通知显示时长 (毫秒)
    pub notification_ttl_ms: u64,
    /// 搜索建议最大条数
    pub search_limit: usize,
    /// IANA 时区名
    pub timezone: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录 (None = 只输出到终端)
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 无法解析的数值回退到默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            catalog_path: lookup("CATALOG_PATH").unwrap_or_else(|| "data/catalog.json".into()),
            export_dir: lookup("EXPORT_DIR").unwrap_or_else(|| "exports".into()),
            export_format: lookup("EXPORT_FORMAT")
                .and_then(|v| ExportFormat::parse(&v))
                .unwrap_or_default(),
            relay_contact: lookup("RELAY_CONTACT").unwrap_or_else(|| "+923403004201".into()),
            relay_base_url: lookup("RELAY_BASE_URL").unwrap_or_else(|| "https://wa.me".into()),
            notification_ttl_ms: lookup("NOTIFICATION_TTL_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            search_limit: lookup("SEARCH_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            timezone: lookup("TIMEZONE").unwrap_or_else(|| "UTC".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        }
    }

    /// 测试用配置，不读取环境变量
    pub fn for_tests() -> Self {
        Self::from_lookup(|_| None)
    }

    /// 通知显示时长
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// 解析时区，无效时回退到 UTC
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!(timezone = %self.timezone, "Unknown timezone, falling back to UTC");
                Tz::UTC
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
