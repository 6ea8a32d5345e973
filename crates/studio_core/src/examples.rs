//! Fixed one-click prompt fill-ins.

pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "A flowing evening gown with intricate embroidery, deep emerald color",
    "Modern streetwear jacket with geometric patterns, urban style",
    "Elegant minimalist dress, monochrome palette, sustainable materials",
    "Bohemian summer outfit with floral patterns and earth tones",
];

pub fn example_prompt(index: usize) -> Option<&'static str> {
    EXAMPLE_PROMPTS.get(index).copied()
}
