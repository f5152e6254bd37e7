use serde::{Deserialize, Serialize};

/// A remote ICE candidate as it travels through the relay.
///
/// Two encodings are accepted: the structured field form produced by
/// publisher-side engines, and the browser `RTCIceCandidateInit` form whose
/// `candidate` member already holds the SDP attribute line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IceCandidate {
    Fields(IceCandidateFields),
    Init(IceCandidateInit),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidateFields {
    pub component: u16,
    pub foundation: String,
    pub ip: String,
    pub port: u16,
    pub priority: u32,
    pub protocol: String,
    #[serde(alias = "type")]
    pub candidate_type: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(default)]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidateInit {
    pub candidate: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(default)]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

impl IceCandidateFields {
    /// Renders the `candidate:` attribute value (RFC 8839 grammar).
    pub fn to_sdp_line(&self) -> String {
        let mut line = format!(
            "candidate:{} {} {} {} {} {} typ {}",
            self.foundation,
            self.component,
            self.protocol,
            self.priority,
            self.ip,
            self.port,
            self.candidate_type
        );
        if let (Some(address), Some(port)) = (&self.related_address, self.related_port) {
            line.push_str(&format!(" raddr {address} rport {port}"));
        }
        line
    }
}

impl IceCandidate {
    pub fn sdp_line(&self) -> String {
        match self {
            IceCandidate::Fields(fields) => fields.to_sdp_line(),
            IceCandidate::Init(init) => init.candidate.clone(),
        }
    }

    pub fn sdp_mid(&self) -> Option<&str> {
        match self {
            IceCandidate::Fields(fields) => fields.sdp_mid.as_deref(),
            IceCandidate::Init(init) => init.sdp_mid.as_deref(),
        }
    }

    pub fn sdp_m_line_index(&self) -> Option<u16> {
        match self {
            IceCandidate::Fields(fields) => fields.sdp_m_line_index,
            IceCandidate::Init(init) => init.sdp_m_line_index,
        }
    }

    pub fn username_fragment(&self) -> Option<&str> {
        match self {
            IceCandidate::Fields(_) => None,
            IceCandidate::Init(init) => init.username_fragment.as_deref(),
        }
    }
}
