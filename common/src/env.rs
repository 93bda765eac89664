pub fn get_env_usize(key: &str) -> Option<usize> {
    std::env::var(key)
        .map(|v| {
            v.parse::<usize>()
                .unwrap_or_else(|_| panic!("{} must be a valid number", key))
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_usize_missing() {
        assert_eq!(get_env_usize("SOLVER_TEST_UNSET_VARIABLE"), None);
    }
}
