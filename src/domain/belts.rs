/// Belt progression chain, lowest to highest.
pub const BELT_ORDER: [&str; 9] = [
    "Branca", "Cinza", "Azul", "Amarela", "Laranja", "Verde", "Roxa", "Marrom", "Preta",
];

/// Default rank assigned to new students.
pub const DEFAULT_RANK: &str = BELT_ORDER[0];

/// Returns true if `rank` is a member of the progression chain.
pub fn is_valid_rank(rank: &str) -> bool {
    BELT_ORDER.contains(&rank)
}

/// Next rank in the chain after `current`.
///
/// The top rank has no successor. A rank that is not in the chain falls
/// back to the second rank ("Cinza") — promotion policy for students whose
/// recorded rank predates the current chain, not an error.
pub fn next_rank(current: &str) -> Option<&'static str> {
    match BELT_ORDER.iter().position(|r| *r == current) {
        Some(index) => BELT_ORDER.get(index + 1).copied(),
        None => Some(BELT_ORDER[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_rank_progression() {
        assert_eq!(next_rank("Branca"), Some("Cinza"));
        assert_eq!(next_rank("Cinza"), Some("Azul"));
        assert_eq!(next_rank("Marrom"), Some("Preta"));
    }

    #[test]
    fn test_top_rank_has_no_successor() {
        assert_eq!(next_rank("Preta"), None);
    }

    #[test]
    fn test_unknown_rank_falls_back_to_second() {
        assert_eq!(next_rank("Faixa Vermelha"), Some("Cinza"));
        assert_eq!(next_rank(""), Some("Cinza"));
    }

    #[test]
    fn test_rank_validity() {
        assert!(is_valid_rank("Branca"));
        assert!(is_valid_rank("Preta"));
        assert!(!is_valid_rank("branca"));
        assert!(!is_valid_rank("Vermelha"));
    }
}
