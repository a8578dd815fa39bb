pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Short hex tag identifying one medium handle in logs and temp file names.
pub fn new_handle_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn handle_id_length() {
        assert_eq!(new_handle_id().len(), 8);
    }

    #[test]
    fn handle_id_is_hex() {
        let hid = new_handle_id();
        assert!(hid.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
