//! Router seam
//!
//! The page shell owns real routing; the hub only needs to navigate and
//! to inspect the current path when resolving chapter commands.

/// Navigation operations the hub consumes from the page shell
pub trait Router: Send {
    /// Navigate to the given route path
    fn navigate(&mut self, path: &str);

    /// The currently displayed route path
    fn current_path(&self) -> String;
}

/// In-memory router for shells without history integration and for tests
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    path: String,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self {
            path: "/".to_string(),
        }
    }

    /// Start at a specific path
    pub fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for MemoryRouter {
    fn navigate(&mut self, path: &str) {
        self.path = path.to_string();
    }

    fn current_path(&self) -> String {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_router_starts_at_root() {
        let router = MemoryRouter::new();
        assert_eq!(router.current_path(), "/");
    }

    #[test]
    fn test_navigate_updates_current_path() {
        let mut router = MemoryRouter::at("/physics");
        assert_eq!(router.current_path(), "/physics");

        router.navigate("/chemistry/chapter-1");
        assert_eq!(router.current_path(), "/chemistry/chapter-1");
    }
}
