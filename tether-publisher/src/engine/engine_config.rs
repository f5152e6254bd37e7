/// ICE settings for publisher-side peer connections.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub ice_servers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec!["stun:stun.l.google.com:19302".to_owned()],
        }
    }
}
