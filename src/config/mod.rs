mod settings;

pub use settings::{
    ApiKey, FileSettings, Settings, Target, APEX, DEFAULT_API_URL, DEFAULT_IP_URL, DEFAULT_TTL,
};
