//! Décodage et découpage du texte d'un fichier de contrôle

use std::borrow::Cow;

use memchr::memchr;

/// Décode le contenu brut: UTF-8 si valide (BOM retiré), sinon Windows-1252
pub fn decode(data: &[u8]) -> Cow<'_, str> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);

    match simdutf8::basic::from_utf8(data) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (decoded, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(data);
            decoded
        }
    }
}

/// Découpe le texte en lignes de cellules.
///
/// Séparateur: tabulation si la ligne en contient, sinon virgule, sinon
/// espaces. Les lignes vides sont ignorées.
pub fn split_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(split_line)
        .collect()
}

fn split_line(line: &str) -> Vec<String> {
    let bytes = line.as_bytes();
    let cells: Vec<&str> = if memchr(b'\t', bytes).is_some() {
        line.split('\t').collect()
    } else if memchr(b',', bytes).is_some() {
        line.split(',').collect()
    } else {
        line.split_whitespace().collect()
    };

    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let text = decode("5.7\t45.1\t0\t1\t2\timage_é.jpg".as_bytes());
        assert!(matches!(text, Cow::Borrowed(_)));
        assert!(text.ends_with("image_é.jpg"));
    }

    #[test]
    fn test_decode_strips_bom() {
        let text = decode(b"\xEF\xBB\xBFa\tb");
        assert_eq!(text, "a\tb");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // "é" en Windows-1252
        let text = decode(b"image_\xE9.jpg");
        assert_eq!(text, "image_é.jpg");
    }

    #[test]
    fn test_split_tabs() {
        let rows = split_rows("5.7\t45.1\t0\t1\t2\tmy image.jpg\r\n\r\n6\t46\t0\t3\t4\tb.jpg\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["5.7", "45.1", "0", "1", "2", "my image.jpg"]);
    }

    #[test]
    fn test_split_commas_and_spaces() {
        let rows = split_rows("1, 2 ,3\n4   5 6");
        assert_eq!(rows[0], vec!["1", "2", "3"]);
        assert_eq!(rows[1], vec!["4", "5", "6"]);
    }

    #[test]
    fn test_split_keeps_empty_cells() {
        let rows = split_rows("1\t\t3");
        assert_eq!(rows[0], vec!["1", "", "3"]);
    }
}
