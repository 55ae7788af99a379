// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
];

/// User-Agent池
///
/// 每次请求随机选取一个
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    /// 使用自定义列表创建，列表为空时退回内置池
    pub fn new(agents: Vec<String>) -> Self {
        if agents.is_empty() {
            return Self::default();
        }
        Self { agents }
    }

    pub fn pick(&self) -> &str {
        &self.agents[rand::random_range(0..self.agents.len())]
    }

    pub fn contains(&self, agent: &str) -> bool {
        self.agents.iter().any(|a| a == agent)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self {
            agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pick_stays_within_pool() {
        let pool = UserAgentPool::default();
        for _ in 0..200 {
            assert!(pool.contains(pool.pick()));
        }
    }

    #[test]
    fn test_pick_rotates_agents() {
        let pool = UserAgentPool::default();
        let seen: HashSet<&str> = (0..500).map(|_| pool.pick()).collect();
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_empty_custom_pool_falls_back() {
        let pool = UserAgentPool::new(Vec::new());
        assert_eq!(pool.len(), DEFAULT_USER_AGENTS.len());

        let pool = UserAgentPool::new(vec!["agent/1.0".to_string()]);
        assert_eq!(pool.pick(), "agent/1.0");
    }
}
