use std::collections::HashMap;

use once_cell::sync::Lazy;

const GLYPH_HEIGHT: usize = 5;
const FILL_CHAR: char = '█';

type Glyph = [&'static str; GLYPH_HEIGHT];

static GLYPHS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    HashMap::from([
        ('D', ["###.", "#..#", "#..#", "#..#", "###."]),
        ('E', ["####", "#...", "###.", "#...", "####"]),
        ('F', ["####", "#...", "###.", "#...", "#..."]),
        ('K', ["#..#", "#.#.", "##..", "#.#.", "#..#"]),
        ('N', ["#..#", "##.#", "#.##", "#..#", "#..#"]),
        ('O', [".##.", "#..#", "#..#", "#..#", ".##."]),
        ('R', ["###.", "#..#", "###.", "#.#.", "#..#"]),
        ('S', [".###", "#...", ".##.", "...#", "###."]),
        ('T', ["####", ".#..", ".#..", ".#..", ".#.."]),
        (' ', ["..", "..", "..", "..", ".."]),
        ('?', [".##.", "...#", "..#.", "....", "..#."]),
    ])
});

/// Render `text` as block letters, one string per row.
pub fn render(text: &str) -> Vec<String> {
    let mut rows = vec![String::new(); GLYPH_HEIGHT];
    for (index, ch) in text.chars().map(|c| c.to_ascii_uppercase()).enumerate() {
        let Some(glyph) = GLYPHS.get(&ch).or_else(|| GLYPHS.get(&'?')) else {
            continue;
        };
        for (row, pattern) in rows.iter_mut().zip(glyph.iter()) {
            if index > 0 {
                row.push(' ');
            }
            row.extend(pattern.chars().map(|cell| if cell == '#' { FILL_CHAR } else { ' ' }));
        }
    }
    rows.into_iter()
        .map(|row| row.trim_end().to_string())
        .collect()
}
