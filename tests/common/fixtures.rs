//! Test fixtures: color schemes on disk.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// A dark-background palette: 16 ANSI colors then foreground, background,
/// bold, cursor and cursor text.
pub const DARK_PALETTE: [(&str, [u8; 3]); 21] = [
    ("Ansi 0 Color", [0x28, 0x28, 0x28]),
    ("Ansi 1 Color", [0xcc, 0x24, 0x1d]),
    ("Ansi 2 Color", [0x98, 0x97, 0x1a]),
    ("Ansi 3 Color", [0xd7, 0x99, 0x21]),
    ("Ansi 4 Color", [0x45, 0x85, 0x88]),
    ("Ansi 5 Color", [0xb1, 0x62, 0x86]),
    ("Ansi 6 Color", [0x68, 0x9d, 0x6a]),
    ("Ansi 7 Color", [0xa8, 0x99, 0x84]),
    ("Ansi 8 Color", [0x92, 0x83, 0x74]),
    ("Ansi 9 Color", [0xfb, 0x49, 0x34]),
    ("Ansi 10 Color", [0xb8, 0xbb, 0x26]),
    ("Ansi 11 Color", [0xfa, 0xbd, 0x2f]),
    ("Ansi 12 Color", [0x83, 0xa5, 0x98]),
    ("Ansi 13 Color", [0xd3, 0x86, 0x9b]),
    ("Ansi 14 Color", [0x8e, 0xc0, 0x7c]),
    ("Ansi 15 Color", [0xeb, 0xdb, 0xb2]),
    ("Foreground Color", [0xeb, 0xdb, 0xb2]),
    ("Background Color", [0x28, 0x28, 0x28]),
    ("Bold Color", [0xff, 0xff, 0xff]),
    ("Cursor Color", [0xeb, 0xdb, 0xb2]),
    ("Cursor Text Color", [0x28, 0x28, 0x28]),
];

/// Rows that are not translated but must survive a rewrite.
pub const EXTRA_ROWS: [(&str, [u8; 3]); 2] = [
    ("Selection Color", [0x50, 0x49, 0x45]),
    ("Link Color", [0x00, 0x5b, 0xbb]),
];

/// Render rows as an `.itermcolors` XML property list.
///
/// Each row also carries `Alpha Component` and `Color Space` keys.
pub fn scheme_xml(rows: &[(&str, [u8; 3])]) -> String {
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
        "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
        "<plist version=\"1.0\">\n<dict>\n",
    ));
    for (name, [r, g, b]) in rows {
        let _ = write!(
            xml,
            concat!(
                "\t<key>{}</key>\n\t<dict>\n",
                "\t\t<key>Alpha Component</key>\n\t\t<real>1</real>\n",
                "\t\t<key>Blue Component</key>\n\t\t<real>{}</real>\n",
                "\t\t<key>Color Space</key>\n\t\t<string>sRGB</string>\n",
                "\t\t<key>Green Component</key>\n\t\t<real>{}</real>\n",
                "\t\t<key>Red Component</key>\n\t\t<real>{}</real>\n",
                "\t</dict>\n",
            ),
            name,
            f64::from(*b) / 255.0,
            f64::from(*g) / 255.0,
            f64::from(*r) / 255.0,
        );
    }
    xml.push_str("</dict>\n</plist>\n");
    xml
}

/// The full dark palette plus the extra rows.
pub fn dark_scheme_xml() -> String {
    let rows: Vec<_> = DARK_PALETTE.iter().chain(EXTRA_ROWS.iter()).copied().collect();
    scheme_xml(&rows)
}

/// Write `xml` to `dir/name` and return the path.
pub fn write_scheme(dir: &Path, name: &str, xml: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, xml).expect("Failed to write scheme fixture");
    path
}
