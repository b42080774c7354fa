//! Synthesized image references
//!
//! Pictures are not stored by the engine; a dish or user only carries the
//! path the presentation layer uploads the file under.

const DEFAULT_IMAGE_NAME: &str = "imagem_padrao";
const MAX_IMAGE_NAME_LEN: usize = 50;
const DEFAULT_EXTENSION: &str = "jpg";

/// Fold Latin-1 and Latin Extended-A accented letters onto their ASCII base
///
/// Only precomposed letters in this table are folded; anything else that is
/// not `[a-z0-9_-]` is dropped by [`format_image_name`].
pub(crate) fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ý' | 'ÿ' => 'y',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ź' | 'ż' | 'ž' => 'z',
        'ď' | 'đ' => 'd',
        'ğ' | 'ĝ' | 'ġ' | 'ģ' => 'g',
        'ł' | 'ĺ' | 'ļ' | 'ľ' => 'l',
        'ŕ' | 'ř' => 'r',
        'ţ' | 'ť' => 't',
        other => other,
    }
}

/// File-name slug for a display name
///
/// Lower-cased, accents folded, only `[a-z0-9_-]` kept, whitespace runs
/// become `_`, at most 50 characters. Empty input yields `imagem_padrao`.
pub fn format_image_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;

    for c in name.to_lowercase().chars().map(fold_accent) {
        if c.is_whitespace() {
            in_space = true;
            continue;
        }
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            continue;
        }
        if in_space {
            slug.push('_');
            in_space = false;
        }
        slug.push(c);
    }
    if in_space {
        slug.push('_');
    }

    let slug = slug.replace("__", "_");
    let slug: String = slug.chars().take(MAX_IMAGE_NAME_LEN).collect();
    if slug.is_empty() {
        DEFAULT_IMAGE_NAME.to_string()
    } else {
        slug
    }
}

fn extension_or_default(extension: Option<&str>) -> String {
    extension
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// `img/dishes/<slug>.<ext>`, extension defaults to `jpg`
pub fn dish_image_ref(name: &str, extension: Option<&str>) -> String {
    format!(
        "img/dishes/{}.{}",
        format_image_name(name),
        extension_or_default(extension)
    )
}

/// `img/users/<slug>.<ext>`
pub fn user_image_ref(name: &str, extension: &str) -> String {
    format!(
        "img/users/{}.{}",
        format_image_name(name),
        extension_or_default(Some(extension))
    )
}
