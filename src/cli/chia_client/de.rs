pub mod hex_string_to_secret_key {
    use chia::bls::SecretKey;
    use hex::FromHex;
    use serde::{self, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = <[u8; 32]>::from_hex(s.trim_start_matches("0x"))
            .map_err(serde::de::Error::custom)?;
        SecretKey::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
