use std::io::Write;

use crate::keys::VapidKeys;

pub const PUBLIC_KEY_VAR: &str = "NEXT_PUBLIC_VAPID_PUBLIC_KEY";
pub const PRIVATE_KEY_VAR: &str = "VAPID_PRIVATE_KEY";

const SEPARATOR_WIDTH: usize = 80;

/// Renders the banner printed by `generate-vapid-keys`.
pub fn format(keys: &VapidKeys) -> String {
    let sep = "=".repeat(SEPARATOR_WIDTH);
    format!(
        "{sep}\n\
         VAPID Keys Generated Successfully!\n\
         {sep}\n\
         \n\
         Add these to your Vercel environment variables:\n\
         \n\
         {PUBLIC_KEY_VAR}={public}\n\
         \n\
         {PRIVATE_KEY_VAR}={private}\n\
         \n\
         {sep}\n\
         \n\
         IMPORTANT: Keep the private key secret!\n\
         {sep}\n",
        public = keys.public_key,
        private = keys.private_key,
    )
}

/// Writes the banner to `out` and flushes it.
pub fn write(out: &mut impl Write, keys: &VapidKeys) -> std::io::Result<()> {
    out.write_all(format(keys).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> VapidKeys {
        VapidKeys {
            public_key: "BPub-_key".to_string(),
            private_key: "MIGHpriv".to_string(),
        }
    }

    #[test]
    fn banner_matches_layout() {
        let sep = "=".repeat(80);
        let sep = sep.as_str();
        let expected = [
            sep,
            "VAPID Keys Generated Successfully!",
            sep,
            "",
            "Add these to your Vercel environment variables:",
            "",
            "NEXT_PUBLIC_VAPID_PUBLIC_KEY=BPub-_key",
            "",
            "VAPID_PRIVATE_KEY=MIGHpriv",
            "",
            sep,
            "",
            "IMPORTANT: Keep the private key secret!",
            sep,
        ]
        .join("\n")
            + "\n";
        assert_eq!(format(&sample()), expected);
    }

    #[test]
    fn writes_to_sink() {
        let mut buf = Vec::new();
        write(&mut buf, &sample()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), format(&sample()));
    }
}
