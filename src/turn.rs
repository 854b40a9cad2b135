use std::fmt;

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Turn {
    Red,
    Yellow,
}

impl Turn {
    /// The side that moves after this one
    pub fn next(self) -> Self {
        match self {
            Turn::Red => Turn::Yellow,
            Turn::Yellow => Turn::Red,
        }
    }

    /// Single character used when rendering boards
    pub fn initial(self) -> char {
        match self {
            Turn::Red => 'R',
            Turn::Yellow => 'Y',
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Red => write!(f, "Red"),
            Turn::Yellow => write!(f, "Yellow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_is_an_involution() {
        assert_eq!(Turn::Red.next(), Turn::Yellow);
        assert_eq!(Turn::Yellow.next(), Turn::Red);
        assert_eq!(Turn::Red.next().next(), Turn::Red);
    }

    #[test]
    fn initials() {
        assert_eq!(Turn::Red.initial(), 'R');
        assert_eq!(Turn::Yellow.initial(), 'Y');
        assert_eq!(Turn::Yellow.to_string(), "Yellow");
    }
}
