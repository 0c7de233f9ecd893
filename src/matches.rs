macro_rules! byte_map {
    {
        $(#[$meta:meta])*
        $vis:vis const fn $fn_id:ident($byte:ident:$u8:ty) { $e:expr }
    } => {
        $(#[$meta])*
        $vis const fn $fn_id($byte: $u8) -> bool {
            static PAT: [bool; 256] = {
                let mut bytes = [false; 256];
                let mut $byte = 0u8;
                const fn filter($byte: $u8) -> bool {
                    $e
                }
                loop {
                    bytes[$byte as usize] = filter($byte);
                    if $byte == 255 {
                        break;
                    }
                    $byte += 1;
                }
                bytes
            };
            // SAFETY: the pattern size is equal to u8::MAX
            unsafe { *PAT.as_ptr().add($byte as usize) }
        }
    };
}

// ===== Header Name =====

byte_map! {
    /// token   = 1*tchar
    /// tchar   = "!" / "#" / "$" / "%" / "&" / "'" / "*"
    ///         / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
    ///         / DIGIT / ALPHA
    #[inline(always)]
    pub const fn is_token(byte: u8) {
        matches!(
            byte,
            | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
            | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
        || byte.is_ascii_alphanumeric()
    }
}

byte_map! {
    /// Specialized `token` for lowercase only header name.
    #[inline(always)]
    pub const fn is_token_lowercase(byte: u8) {
        is_token(byte) && !byte.is_ascii_uppercase()
    }
}

/// Any invalid character will have it MSB set.
///
/// Character is normalized to lowercase.
pub const HEADER_NAME: [u8; 256] = {
    let mut bytes = [0b10000000; 256];
    let mut i = 0u8;
    loop {
        if is_token(i) {
            bytes[i as usize] = i.to_ascii_lowercase();
        }
        if i == 255 {
            break;
        }
        i += 1;
    }
    bytes
};

// ===== Header Value =====

byte_map! {
    /// Any byte except NUL, CR and LF.
    ///
    /// Stricter `field-content` grammar is not enforced.
    #[inline(always)]
    pub const fn is_header_value(byte: u8) {
        !matches!(byte, b'\0' | b'\r' | b'\n')
    }
}

/// SP / HTAB
#[inline(always)]
pub const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

/// Strip leading and trailing SP / HTAB.
pub const fn trim_whitespace(mut bytes: &[u8]) -> &[u8] {
    while let [byte, rest @ ..] = bytes {
        if !is_whitespace(*byte) {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., byte] = bytes {
        if !is_whitespace(*byte) {
            break;
        }
        bytes = rest;
    }
    bytes
}

// ===== CORS =====

byte_map! {
    /// CORS-unsafe request-header byte.
    ///
    /// Control characters other than HTAB, DEL, and
    /// `"` `(` `)` `:` `<` `>` `?` `@` `[` `\` `]` `{` `}`.
    #[inline(always)]
    pub const fn is_cors_unsafe(byte: u8) {
        (byte < 0x20 && byte != b'\t')
        || matches!(
            byte,
            | b'"' | b'(' | b')' | b':' | b'<' | b'>' | b'?'
            | b'@' | b'[' | b'\\' | b']' | b'{' | b'}' | 0x7F
        )
    }
}

byte_map! {
    /// Allowed bytes of `accept-language` and `content-language` in no-cors request.
    ///
    /// DIGIT / ALPHA / SP / "*" / "," / "-" / "." / ";" / "="
    #[inline(always)]
    pub const fn is_cors_language(byte: u8) {
        byte.is_ascii_alphanumeric()
        || matches!(byte, b' ' | b'*' | b',' | b'-' | b'.' | b';' | b'=')
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn token_table() {
        for byte in b"!#$%&'*+-.^_`|~09azAZ" {
            assert!(is_token(*byte), "{:?}", *byte as char);
        }
        for byte in b"\0 \t\r\n\"(),/:;<=>?@[\\]{}\x7F" {
            assert!(!is_token(*byte), "{:?}", *byte as char);
        }
        assert!(!is_token(0x80));
        assert!(!is_token_lowercase(b'A'));
        assert!(is_token_lowercase(b'a'));

        assert_eq!(HEADER_NAME[b'A' as usize], b'a');
        assert_eq!(HEADER_NAME[b'-' as usize], b'-');
        assert_eq!(HEADER_NAME[b' ' as usize] & 128, 128);
    }

    #[test]
    fn value_table() {
        assert!(!is_header_value(b'\0'));
        assert!(!is_header_value(b'\r'));
        assert!(!is_header_value(b'\n'));
        assert!(is_header_value(b'\t'));
        assert!(is_header_value(0x7F));
        assert!(is_header_value(0xFF));
    }

    #[test]
    fn cors_table() {
        assert!(is_cors_unsafe(b'"'));
        assert!(is_cors_unsafe(0x01));
        assert!(is_cors_unsafe(0x7F));
        assert!(!is_cors_unsafe(b'\t'));
        assert!(!is_cors_unsafe(b'/'));
        assert!(is_cors_language(b';'));
        assert!(!is_cors_language(b'/'));
    }
}
