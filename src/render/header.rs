use crate::config::StyleGlyphs;

/// Continuation markers for every ancestor level of the current line.
///
/// `true` at a level means the branch at that level has more siblings below,
/// so the line is drawn with `extend`; otherwise with `space`. Each folder
/// hands its children a fresh copy via [`Header::descend`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Header {
    continues: Vec<bool>,
}

impl Header {
    pub(crate) fn descend(&self, continues: bool) -> Header {
        let mut continues_vec = self.continues.clone();
        continues_vec.push(continues);
        Header {
            continues: continues_vec,
        }
    }

    pub(crate) fn render(&self, glyphs: &StyleGlyphs) -> String {
        self.continues
            .iter()
            .map(|continues| {
                if *continues {
                    glyphs.extend.as_str()
                } else {
                    glyphs.space.as_str()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs() -> StyleGlyphs {
        let mut glyphs = StyleGlyphs::lines();
        glyphs.extend = "| ".to_string();
        glyphs
    }

    #[test]
    fn root_level_header_is_empty() {
        assert_eq!(Header::default().render(&glyphs()), "");
    }

    #[test]
    fn mixes_extend_and_space() {
        let header = Header::default().descend(true).descend(true).descend(false);
        assert_eq!(header.render(&glyphs()), "| |   ");
    }

    #[test]
    fn descending_leaves_the_parent_untouched() {
        let parent = Header::default().descend(true);
        let _child = parent.descend(false);
        assert_eq!(parent.render(&glyphs()), "| ");
    }
}
