pub mod integration;

pub use common::{init, mock::*, test_utils::*};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup() {
        init();
        assert_eq!(at(0).timestamp(), 0);
    }
}
