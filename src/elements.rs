//! Spell lyric words with chemical element symbols.
//!
//! Every word is read left to right. Two-letter element symbols are preferred over one-letter
//! ones; letters that are not an element fall back to a math symbol and then to the bare letter.

use std::borrow::Cow;

use serde::Serialize;

#[rustfmt::skip]
const ELEMENTS: &[(&str, &str)] = &[
    ("H", "Hydrogen"), ("He", "Helium"), ("Li", "Lithium"), ("Be", "Beryllium"), ("B", "Boron"),
    ("C", "Carbon"), ("N", "Nitrogen"), ("O", "Oxygen"), ("F", "Fluorine"), ("Ne", "Neon"),
    ("Na", "Sodium"), ("Mg", "Magnesium"), ("Al", "Aluminum"), ("Si", "Silicon"), ("P", "Phosphorus"),
    ("S", "Sulfur"), ("Cl", "Chlorine"), ("Ar", "Argon"), ("K", "Potassium"), ("Ca", "Calcium"),
    ("Sc", "Scandium"), ("Ti", "Titanium"), ("V", "Vanadium"), ("Cr", "Chromium"), ("Mn", "Manganese"),
    ("Fe", "Iron"), ("Co", "Cobalt"), ("Ni", "Nickel"), ("Cu", "Copper"), ("Zn", "Zinc"),
    ("Ga", "Gallium"), ("Ge", "Germanium"), ("As", "Arsenic"), ("Se", "Selenium"), ("Br", "Bromine"),
    ("Kr", "Krypton"), ("Rb", "Rubidium"), ("Sr", "Strontium"), ("Y", "Yttrium"), ("Zr", "Zirconium"),
    ("Nb", "Niobium"), ("Mo", "Molybdenum"), ("Tc", "Technetium"), ("Ru", "Ruthenium"), ("Rh", "Rhodium"),
    ("Pd", "Palladium"), ("Ag", "Silver"), ("Cd", "Cadmium"), ("In", "Indium"), ("Sn", "Tin"),
    ("Sb", "Antimony"), ("Te", "Tellurium"), ("I", "Iodine"), ("Xe", "Xenon"), ("Cs", "Cesium"),
    ("Ba", "Barium"), ("La", "Lanthanum"), ("Ce", "Cerium"), ("Pr", "Praseodymium"), ("Nd", "Neodymium"),
    ("Pm", "Promethium"), ("Sm", "Samarium"), ("Eu", "Europium"), ("Gd", "Gadolinium"), ("Tb", "Terbium"),
    ("Dy", "Dysprosium"), ("Ho", "Holmium"), ("Er", "Erbium"), ("Tm", "Thulium"), ("Yb", "Ytterbium"),
    ("Lu", "Lutetium"), ("Hf", "Hafnium"), ("Ta", "Tantalum"), ("W", "Tungsten"), ("Re", "Rhenium"),
    ("Os", "Osmium"), ("Ir", "Iridium"), ("Pt", "Platinum"), ("Au", "Gold"), ("Hg", "Mercury"),
    ("Tl", "Thallium"), ("Pb", "Lead"), ("Bi", "Bismuth"), ("Po", "Polonium"), ("At", "Astatine"),
    ("Rn", "Radon"), ("Fr", "Francium"), ("Ra", "Radium"), ("Ac", "Actinium"), ("Th", "Thorium"),
    ("Pa", "Protactinium"), ("U", "Uranium"), ("Np", "Neptunium"), ("Pu", "Plutonium"), ("Am", "Americium"),
    ("Cm", "Curium"), ("Bk", "Berkelium"), ("Cf", "Californium"), ("Es", "Einsteinium"), ("Fm", "Fermium"),
    ("Md", "Mendelevium"), ("No", "Nobelium"), ("Lr", "Lawrencium"),
];

/// Latin letters standing in for math and physics symbols.
#[rustfmt::skip]
const MATH_SYMBOLS: &[(&str, &str)] = &[
    ("A", "Alpha"), ("D", "Delta"), ("E", "Epsilon"), ("G", "Gamma"), ("J", "Joule"),
    ("L", "Lambda"), ("M", "Mu"), ("Q", "Theta"), ("R", "Rho"), ("T", "Tau"),
    ("X", "Chi"), ("Z", "Zeta"),
];

const MAX_NAME_LEN: usize = 10;

fn lookup(table: &'static [(&'static str, &'static str)], symbol: &str) -> Option<&'static str> {
    table.iter().find(|(s, _)| *s == symbol).map(|(_, name)| *name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Element,
    Math,
    Letter,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub symbol: String,
    pub name: Cow<'static, str>,
    pub kind: TileKind,
}

impl Tile {
    fn new(symbol: String, name: impl Into<Cow<'static, str>>, kind: TileKind) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind,
        }
    }

    fn separator() -> Self {
        Self::new("•".to_owned(), "Space", TileKind::Separator)
    }

    /// The name, cut down to fit on a tile.
    #[must_use]
    pub fn short_name(&self) -> Cow<'_, str> {
        if self.name.chars().count() > MAX_NAME_LEN {
            Cow::Owned(format!("{}...", self.name.chars().take(8).collect::<String>()))
        } else {
            Cow::Borrowed(&self.name)
        }
    }
}

/// Spell a single word. Non ASCII letters are dropped.
#[must_use]
pub fn decompose_word(word: &str) -> Vec<Tile> {
    let letters: Vec<char> = word.chars().filter(char::is_ascii_alphabetic).collect();
    let mut tiles = Vec::with_capacity(letters.len());
    let mut i = 0;
    while i < letters.len() {
        if let Some(&next) = letters.get(i + 1) {
            let pair: String = [letters[i].to_ascii_uppercase(), next.to_ascii_lowercase()]
                .into_iter()
                .collect();
            if let Some(name) = lookup(ELEMENTS, &pair) {
                tiles.push(Tile::new(pair, name, TileKind::Element));
                i += 2;
                continue;
            }
        }

        let single = letters[i].to_ascii_uppercase().to_string();
        let tile = if let Some(name) = lookup(ELEMENTS, &single) {
            Tile::new(single, name, TileKind::Element)
        } else if let Some(name) = lookup(MATH_SYMBOLS, &single) {
            Tile::new(single, name, TileKind::Math)
        } else {
            let name = single.clone();
            Tile::new(single, name, TileKind::Letter)
        };
        tiles.push(tile);
        i += 1;
    }
    tiles
}

/// Spell a whole lyric line, with a separator tile between words.
#[must_use]
pub fn decompose_line(line: &str) -> Vec<Tile> {
    let words: Vec<&str> = line.split(' ').filter(|w| !w.trim().is_empty()).collect();
    let mut tiles = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            tiles.push(Tile::separator());
        }
        tiles.extend(decompose_word(word));
    }
    tiles
}
