//! Subject registry: keyword sets and route paths
//!
//! Each subject owns a fixed keyword set and a unique route. Keyword sets
//! must stay pairwise disjoint so first-match-wins stays well defined.

/// Keywords that navigate to the site root
pub const HOME_KEYWORDS: &[&str] = &["home", "main", "index"];

/// The five subject pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Physics,
    Chemistry,
    Math,
    ComputerScience,
    Biology,
}

impl Subject {
    /// All subjects in keyword-match priority order
    pub const ALL: [Subject; 5] = [
        Subject::Physics,
        Subject::Chemistry,
        Subject::Math,
        Subject::ComputerScience,
        Subject::Biology,
    ];

    /// Keywords whose presence in a command selects this subject
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Subject::Physics => &["phy", "physics", "physical"],
            Subject::Chemistry => &["chem", "chemistry", "chemical"],
            Subject::Math => &["math", "mathematics"],
            Subject::ComputerScience => &["comp", "computer", "science"],
            Subject::Biology => &["bio", "biology", "biological"],
        }
    }

    /// Path segment identifying this subject within a route
    pub fn path_segment(&self) -> &'static str {
        match self {
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Math => "math",
            Subject::ComputerScience => "computer-science",
            Subject::Biology => "biology",
        }
    }

    /// Route of the subject's landing page
    pub fn route(&self) -> String {
        format!("/{}", self.path_segment())
    }

    /// Route of the subject's first chapter
    pub fn chapter_one_route(&self) -> String {
        format!("/{}/chapter-1", self.path_segment())
    }

    /// Find the subject whose path segment appears in `path`, if any
    pub fn from_path(path: &str) -> Option<Subject> {
        Subject::ALL
            .iter()
            .copied()
            .find(|subject| path.contains(subject.path_segment()))
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// A navigation destination resolved from a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// The site root
    Home,
    /// A subject landing page
    Subject(Subject),
}

impl NavTarget {
    /// Route path for this destination
    pub fn route(&self) -> String {
        match self {
            NavTarget::Home => "/".to_string(),
            NavTarget::Subject(subject) => subject.route(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_are_unique() {
        for (i, a) in Subject::ALL.iter().enumerate() {
            for b in &Subject::ALL[i + 1..] {
                assert_ne!(a.route(), b.route());
            }
        }
    }

    #[test]
    fn test_keyword_sets_are_disjoint() {
        let mut groups: Vec<&[&str]> =
            Subject::ALL.iter().map(|s| s.keywords()).collect();
        groups.push(HOME_KEYWORDS);

        for (i, a) in groups.iter().enumerate() {
            for b in &groups[i + 1..] {
                for keyword in *a {
                    assert!(
                        !b.contains(keyword),
                        "keyword {keyword:?} appears in two groups"
                    );
                }
            }
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Subject::from_path("/chemistry"), Some(Subject::Chemistry));
        assert_eq!(
            Subject::from_path("/computer-science/chapter-1"),
            Some(Subject::ComputerScience)
        );
        assert_eq!(Subject::from_path("/"), None);
    }

    #[test]
    fn test_chapter_one_route() {
        assert_eq!(Subject::Biology.chapter_one_route(), "/biology/chapter-1");
    }

    #[test]
    fn test_nav_target_routes() {
        assert_eq!(NavTarget::Home.route(), "/");
        assert_eq!(NavTarget::Subject(Subject::Math).route(), "/math");
    }
}
