pub trait TruncateWithEllipsis {
    fn truncate_with_ellipsis(self, max_len: usize) -> Self;
}

impl TruncateWithEllipsis for String {
    fn truncate_with_ellipsis(mut self, max_len: usize) -> Self {
        if self.chars().count() > max_len {
            let end = self.char_indices().nth(max_len.saturating_sub(1)).map_or(0, |(i, _)| i);
            self.truncate(end);
            self.push('…');
        }

        self
    }
}
