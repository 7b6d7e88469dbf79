//! Fill-in-the-middle prompts: the model sees the code before and after a gap and writes the gap.

const PREFIX: &str = "<fim_prefix>";
const SUFFIX: &str = "<fim_suffix>";
const MIDDLE: &str = "<fim_middle>";

const DEMO_CODE: &str = "def fib(n):    else:\n        return fib(n - 2) + fib(n - 1)";
const DEMO_CURSOR: usize = 11;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FimPrompt {
    pub prefix: String,
    pub suffix: String,
}

impl FimPrompt {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), suffix: suffix.into() }
    }

    /// Splits `code` at a cursor given in characters. A cursor past the end sits at the end.
    pub fn at_cursor(code: &str, position: usize) -> Self {
        let split = code.char_indices().nth(position).map_or(code.len(), |(i, _)| i);
        let (prefix, suffix) = code.split_at(split);
        Self::new(prefix, suffix)
    }

    /// The recursive Fibonacci body with the cursor where its base case belongs.
    pub fn demo() -> Self {
        Self::at_cursor(DEMO_CODE, DEMO_CURSOR)
    }

    /// `<fim_prefix>{prefix}<fim_suffix>{suffix}<fim_middle>`, the StarCoder sentinel layout.
    pub fn render(&self) -> String {
        let mut prompt = String::with_capacity(
            PREFIX.len() + self.prefix.len() + SUFFIX.len() + self.suffix.len() + MIDDLE.len(),
        );

        prompt.push_str(PREFIX);
        prompt.push_str(&self.prefix);
        prompt.push_str(SUFFIX);
        prompt.push_str(&self.suffix);
        prompt.push_str(MIDDLE);

        prompt
    }
}
