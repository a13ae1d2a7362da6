use std::fmt;

/// One step of a field path: either a named field or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// Structured location of a field within a written resource, kept as
/// segments so that callers can render or inspect it however they need.
/// `Display` produces the notation users see in error messages: the
/// root alone is `.`, fields append `.name`, and array indices append
/// `[i]` -- e.x. `.routes[2].routes[0].groupWait`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(".");
        }
        for segment in &self.0 {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum Step<'a> {
    Field(&'a str),
    Index(usize),
}

/// Scope is a stack-based mechanism for tracking the fine-grained
/// location currently being converted. Scopes borrow their parent and
/// are cheap to copy; an owned [`Path`] is materialized only when an
/// error is actually recorded.
#[derive(Copy, Clone)]
pub struct Scope<'a> {
    parent: Option<&'a Scope<'a>>,
    step: Option<Step<'a>>,
}

impl<'a> Scope<'a> {
    /// Create a new scope at the root of a resource.
    pub fn root() -> Scope<'a> {
        Scope {
            parent: None,
            step: None,
        }
    }

    /// Push a named field onto the current scope, returning a new scope.
    pub fn push_field(&'a self, name: &'a str) -> Scope<'a> {
        Scope {
            parent: Some(self),
            step: Some(Step::Field(name)),
        }
    }

    /// Push an array index onto the current scope, returning a new scope.
    pub fn push_index(&'a self, index: usize) -> Scope<'a> {
        Scope {
            parent: Some(self),
            step: Some(Step::Index(index)),
        }
    }

    /// Flatten the scope stack into an owned [`Path`].
    pub fn flatten(&self) -> Path {
        let mut segments = Vec::new();
        self.collect(&mut segments);
        Path::from(segments)
    }

    fn collect(&self, out: &mut Vec<Segment>) {
        if let Some(parent) = self.parent {
            parent.collect(out);
        }
        match self.step {
            Some(Step::Field(name)) => out.push(Segment::Field(name.to_string())),
            Some(Step::Index(index)) => out.push(Segment::Index(index)),
            None => (),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Scope, Segment};

    #[test]
    fn test_path_rendering() {
        let root = Scope::root();
        assert_eq!(root.flatten().to_string(), ".");

        let routes = root.push_field("routes");
        let second = routes.push_index(2);
        let children = second.push_field("routes");
        let first = children.push_index(0);
        let wait = first.push_field("groupWait");

        assert_eq!(wait.flatten().to_string(), ".routes[2].routes[0].groupWait");
        assert_eq!(second.flatten().to_string(), ".routes[2]");

        // Flattening does not disturb the scope it came from.
        assert_eq!(wait.flatten().to_string(), ".routes[2].routes[0].groupWait");
    }

    #[test]
    fn test_path_segments() {
        let root = Scope::root();
        let scope = root.push_field("groupWait");
        let path = scope.flatten();

        assert!(!path.is_root());
        assert_eq!(
            path.segments(),
            &[Segment::Field("groupWait".to_string())]
        );
        assert_eq!(path.to_string(), ".groupWait");
    }
}
