//! Stroke glyphs used when no TrueType font is available.
//!
//! Each glyph is a set of line segments `[x1, y1, x2, y2]` in a unit box with
//! y pointing down. Lowercase letters use the uppercase shapes.

type Glyph = &'static [[f32; 4]];

const BOX: Glyph = &[
    [0.0, 0.0, 1.0, 0.0],
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 0.0],
];

/// Segments for `ch`; unknown characters draw nothing.
pub fn glyph(ch: char) -> Glyph {
    match ch.to_ascii_uppercase() {
        '0' | 'O' => BOX,
        '1' => &[[0.5, 0.0, 0.5, 1.0]],
        '2' => &[
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 0.5],
            [1.0, 0.5, 0.0, 0.5],
            [0.0, 0.5, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
        ],
        '3' => &[
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
            [0.0, 0.5, 1.0, 0.5],
        ],
        '4' => &[
            [0.0, 0.0, 0.0, 0.5],
            [0.0, 0.5, 1.0, 0.5],
            [1.0, 0.0, 1.0, 1.0],
        ],
        '5' | 'S' => &[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.5],
            [0.0, 0.5, 1.0, 0.5],
            [1.0, 0.5, 1.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
        ],
        '6' => &[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 0.5],
            [1.0, 0.5, 0.0, 0.5],
        ],
        '7' => &[[0.0, 0.0, 1.0, 0.0], [1.0, 0.0, 0.5, 1.0]],
        '8' => &[
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.5, 1.0, 0.5],
        ],
        '9' => &[
            [0.0, 0.5, 1.0, 0.5],
            [1.0, 0.5, 1.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.5],
            [1.0, 0.5, 1.0, 1.0],
        ],
        'A' => &[
            [0.0, 1.0, 0.5, 0.0],
            [0.5, 0.0, 1.0, 1.0],
            [0.25, 0.5, 0.75, 0.5],
        ],
        'B' => &[
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 0.75, 0.0],
            [0.75, 0.0, 1.0, 0.25],
            [1.0, 0.25, 0.75, 0.5],
            [0.0, 0.5, 0.75, 0.5],
            [0.75, 0.5, 1.0, 0.75],
            [1.0, 0.75, 0.75, 1.0],
            [0.75, 1.0, 0.0, 1.0],
        ],
        'C' => &[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
        ],
        'D' => &[
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 0.6, 0.0],
            [0.6, 0.0, 1.0, 0.4],
            [1.0, 0.4, 1.0, 0.6],
            [1.0, 0.6, 0.6, 1.0],
            [0.6, 1.0, 0.0, 1.0],
        ],
        'E' => &[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
            [0.0, 0.5, 0.75, 0.5],
        ],
        'F' => &[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.5, 0.75, 0.5],
        ],
        'G' => &[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 0.5],
            [1.0, 0.5, 0.5, 0.5],
        ],
        'H' => &[
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 1.0],
            [0.0, 0.5, 1.0, 0.5],
        ],
        'I' => &[
            [0.5, 0.0, 0.5, 1.0],
            [0.2, 0.0, 0.8, 0.0],
            [0.2, 1.0, 0.8, 1.0],
        ],
        'J' => &[
            [1.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 0.7],
        ],
        'K' => &[
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 0.5],
            [0.0, 0.5, 1.0, 1.0],
        ],
        'L' => &[[0.0, 0.0, 0.0, 1.0], [0.0, 1.0, 1.0, 1.0]],
        'M' => &[
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.5, 0.5],
            [0.5, 0.5, 1.0, 0.0],
            [1.0, 0.0, 1.0, 1.0],
        ],
        'N' => &[
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 0.0],
        ],
        'P' => &[
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 0.5],
            [1.0, 0.5, 0.0, 0.5],
        ],
        'Q' => &[
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.6, 0.6, 1.0, 1.0],
        ],
        'R' => &[
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 0.5],
            [1.0, 0.5, 0.0, 0.5],
            [0.4, 0.5, 1.0, 1.0],
        ],
        'T' => &[[0.0, 0.0, 1.0, 0.0], [0.5, 0.0, 0.5, 1.0]],
        'U' => &[
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 0.0],
        ],
        'V' => &[[0.0, 0.0, 0.5, 1.0], [0.5, 1.0, 1.0, 0.0]],
        'W' => &[
            [0.0, 0.0, 0.25, 1.0],
            [0.25, 1.0, 0.5, 0.5],
            [0.5, 0.5, 0.75, 1.0],
            [0.75, 1.0, 1.0, 0.0],
        ],
        'X' => &[[0.0, 0.0, 1.0, 1.0], [1.0, 0.0, 0.0, 1.0]],
        'Y' => &[
            [0.0, 0.0, 0.5, 0.5],
            [1.0, 0.0, 0.5, 0.5],
            [0.5, 0.5, 0.5, 1.0],
        ],
        'Z' => &[
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
        ],
        '-' => &[[0.0, 0.5, 1.0, 0.5]],
        '+' => &[[0.0, 0.5, 1.0, 0.5], [0.5, 0.25, 0.5, 0.75]],
        '.' => &[[0.5, 0.85, 0.5, 1.0]],
        ',' => &[[0.5, 0.85, 0.35, 1.1]],
        ':' => &[[0.5, 0.25, 0.5, 0.35], [0.5, 0.75, 0.5, 0.85]],
        '/' => &[[1.0, 0.0, 0.0, 1.0]],
        '(' => &[
            [0.7, 0.0, 0.4, 0.3],
            [0.4, 0.3, 0.4, 0.7],
            [0.4, 0.7, 0.7, 1.0],
        ],
        ')' => &[
            [0.3, 0.0, 0.6, 0.3],
            [0.6, 0.3, 0.6, 0.7],
            [0.6, 0.7, 0.3, 1.0],
        ],
        '%' => &[
            [0.0, 1.0, 1.0, 0.0],
            [0.1, 0.1, 0.25, 0.25],
            [0.75, 0.75, 0.9, 0.9],
        ],
        '²' => &[
            [0.3, 0.0, 0.7, 0.0],
            [0.7, 0.0, 0.7, 0.2],
            [0.7, 0.2, 0.3, 0.2],
            [0.3, 0.2, 0.3, 0.4],
            [0.3, 0.4, 0.7, 0.4],
        ],
        'µ' => &[
            [0.0, 0.4, 0.0, 1.2],
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 0.4],
        ],
        _ => &[],
    }
}
