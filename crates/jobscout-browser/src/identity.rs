/// Client identity presented to career sites.
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl ClientIdentity {
    /// Desktop Chrome on Windows at 1920x1080.
    pub fn desktop_chrome() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }

    /// Replace the user agent; blank values keep the current one.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        if !user_agent.trim().is_empty() {
            self.user_agent = user_agent;
        }
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self::desktop_chrome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_identity() {
        let identity = ClientIdentity::desktop_chrome();
        assert!(identity.user_agent.contains("Chrome/120"));
        assert!(identity.viewport_width > 0);
        assert!(identity.viewport_height > 0);
    }

    #[test]
    fn test_blank_user_agent_is_ignored() {
        let identity = ClientIdentity::desktop_chrome().with_user_agent("  ");
        assert!(identity.user_agent.contains("Chrome/120"));

        let identity = ClientIdentity::desktop_chrome().with_user_agent("JobScout/0.1");
        assert_eq!(identity.user_agent, "JobScout/0.1");
    }
}
