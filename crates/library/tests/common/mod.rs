// FILE: crates/library/tests/common/mod.rs
//! PDF fixtures with real cross-reference tables

#![allow(dead_code)]

/// Objects written in one revision, as `(object number, body)`
pub type Revision = Vec<(u32, String)>;

/// Builds a PDF from one or more revisions
///
/// Every revision after the first is an incremental update: its objects are
/// appended with a new xref section whose trailer points back through
/// `/Prev`. `info` names the information dictionary object.
pub fn pdf(revisions: &[Revision], info: u32) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n".to_vec();
    let mut prev: Option<usize> = None;
    let mut size = 1;

    for (index, revision) in revisions.iter().enumerate() {
        if index > 0 {
            // lopdf looks for %%EOF in the final 512 bytes only
            out.extend_from_slice(format!("%{}\n", " ".repeat(600)).as_bytes());
        }

        let mut offsets = Vec::new();
        for (id, body) in revision {
            offsets.push((*id, out.len()));
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, body).as_bytes());
            size = size.max(id + 1);
        }

        let xref_start = out.len();
        out.extend_from_slice(b"xref\n");
        if index == 0 {
            out.extend_from_slice(b"0 1\n0000000000 65535 f \n");
        }
        for (id, offset) in &offsets {
            out.extend_from_slice(format!("{} 1\n{:010} 00000 n \n", id, offset).as_bytes());
        }

        let prev_entry = prev.map(|p| format!(" /Prev {}", p)).unwrap_or_default();
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R{} >>\nstartxref\n{}\n%%EOF\n",
                size, info, prev_entry, xref_start
            )
            .as_bytes(),
        );
        prev = Some(xref_start);
    }

    out
}

/// Catalog, page tree, `pages` pages and an information dictionary
pub fn revision(pages: u32, info: &str) -> Revision {
    let kids: Vec<String> = (0..pages).map(|i| format!("{} 0 R", i + 3)).collect();

    let mut objects = vec![
        (1, "<< /Type /Catalog /Pages 2 0 R >>".to_string()),
        (
            2,
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages),
        ),
    ];
    for i in 0..pages {
        objects.push((i + 3, "<< /Type /Page /Parent 2 0 R >>".to_string()));
    }
    objects.push((pages + 3, info.to_string()));
    objects
}

/// Single-revision PDF whose information dictionary carries `author`
pub fn simple_pdf(pages: u32, author: &str) -> Vec<u8> {
    pdf(
        &[revision(pages, &format!("<< /Author ({}) >>", author))],
        pages + 3,
    )
}
