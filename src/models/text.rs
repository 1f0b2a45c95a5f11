//! Label normalization shared by the closed enumerations
//!
//! Month, kind and category labels are Portuguese and carry accents
//! ("Março", "Variável", "Saúde"). Input from the command line or an old
//! backup file may drop the accents or change the case, so matching goes
//! through [`fold_label`].

/// Lowercase, trim and strip the Latin diacritics that appear in labels
pub fn fold_label(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
