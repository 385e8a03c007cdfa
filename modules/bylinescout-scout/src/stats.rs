/// Stats from a scout run.
#[derive(Debug, Default)]
pub struct ScoutStats {
    pub candidates_found: u32,
    pub ranked: u32,
    pub authors_tried: u32,
    pub authors_resolved: u32,
    pub authors_failed: u32,
}

impl std::fmt::Display for ScoutStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Scout Run Complete ===")?;
        writeln!(f, "Candidates found:  {}", self.candidates_found)?;
        writeln!(f, "Ranked (top-K):    {}", self.ranked)?;
        writeln!(f, "Authors tried:     {}", self.authors_tried)?;
        writeln!(f, "Authors resolved:  {}", self.authors_resolved)?;
        writeln!(f, "Authors failed:    {}", self.authors_failed)?;
        Ok(())
    }
}
