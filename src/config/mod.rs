/// 환경 변수 기반 설정
// region:    --- Imports
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;
// endregion: --- Imports

// region:    --- Config
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BID_MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("환경 변수 {key} 값이 올바르지 않습니다: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// 없으면 메모리 저장소를 사용한다
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    /// 저장소 오류 시 입찰 시도 횟수 (1 이상)
    pub bid_max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정을 읽는다
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let bind_addr: SocketAddr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?;
        let db_max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", Some(DEFAULT_DB_MAX_CONNECTIONS))?;
        let bid_max_retries = parse_or(&lookup, "BID_MAX_RETRIES", Some(DEFAULT_BID_MAX_RETRIES))?;

        if bid_max_retries == 0 {
            return Err(ConfigError::Invalid {
                key: "BID_MAX_RETRIES",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            bid_max_retries,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => default.ok_or(ConfigError::Invalid {
            key,
            value: String::new(),
        }),
    }
}
// endregion: --- Config
