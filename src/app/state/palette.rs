use crate::app::overlay::{Overlay, Presentation};
use crate::domain::models::PaletteOption;

/// Renderer-side state for one palette session: the presented options plus
/// the query and selection the user is driving.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteState {
    pub overlay: Overlay,
    pub placeholder: String,
    pub options: Vec<PaletteOption>,
    pub query: String,
    pub matches: Vec<usize>, // Indices into `options`
    pub selected_index: usize,
}

impl PaletteState {
    #[must_use]
    pub fn from_presentation(presentation: Presentation) -> Self {
        let mut state = Self {
            overlay: presentation.overlay,
            placeholder: presentation.placeholder,
            options: presentation.options,
            query: String::new(),
            matches: Vec::new(),
            selected_index: 0,
        };
        state.refilter();
        state
    }

    /// Swaps in a freshly built option list, keeping the query and, where
    /// it still exists, the selected row.
    pub fn replace_options(&mut self, options: Vec<PaletteOption>) {
        let selected = self.selected_index;
        self.options = options;
        self.refilter();
        self.selected_index = selected.min(self.matches.len().saturating_sub(1));
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refilter();
        }
    }

    pub fn select_next(&mut self) {
        if !self.matches.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.matches.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.matches.is_empty() {
            if self.selected_index == 0 {
                self.selected_index = self.matches.len() - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&PaletteOption> {
        self.matches
            .get(self.selected_index)
            .and_then(|&i| self.options.get(i))
    }

    pub fn visible(&self) -> impl Iterator<Item = &PaletteOption> {
        self.matches.iter().filter_map(|&i| self.options.get(i))
    }

    fn refilter(&mut self) {
        self.matches = search_options(&self.options, &self.query);
        self.selected_index = 0;
    }
}

/// Indices of options matching `query`: title matches first, then
/// description-only matches, each group in list order.
#[must_use]
pub fn search_options(options: &[PaletteOption], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    let query_lower = query.to_lowercase();
    let mut results: Vec<usize> = options
        .iter()
        .enumerate()
        .filter(|(_, o)| o.title.to_lowercase().contains(&query_lower))
        .map(|(i, _)| i)
        .collect();

    for (i, option) in options.iter().enumerate() {
        let in_description = option
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(&query_lower));
        if in_description && !results.contains(&i) {
            results.push(i);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ActionId, OptionAction};

    fn option(title: &str, description: Option<&str>) -> PaletteOption {
        PaletteOption::new(title, OptionAction::RunAction(ActionId::new(title)))
            .with_description(description.map(str::to_string))
    }

    fn palette() -> PaletteState {
        PaletteState::from_presentation(Presentation {
            overlay: Overlay::Command,
            placeholder: "Execute a command…".to_string(),
            options: vec![
                option("New Window", Some("Open a new terminal window")),
                option("Close Surface", Some("Close the focused split")),
                option("Split Right", None),
                option("Toggle Fullscreen", Some("Make the window fill the screen")),
            ],
        })
    }

    #[test]
    fn test_empty_query_matches_all() {
        let state = palette();
        assert_eq!(state.matches, vec![0, 1, 2, 3]);
        assert_eq!(state.selected().unwrap().title, "New Window");
    }

    #[test]
    fn test_title_matches_rank_before_description() {
        let mut state = palette();
        for c in "window".chars() {
            state.push_char(c);
        }
        // "New Window" by title, "Toggle Fullscreen" by description only.
        assert_eq!(state.matches, vec![0, 3]);

        state.pop_char();
        state.clear_query();
        assert_eq!(state.matches.len(), 4);
    }

    #[test]
    fn test_selection_wraps_and_resets() {
        let mut state = palette();
        state.select_prev();
        assert_eq!(state.selected_index, 3);
        state.select_next();
        assert_eq!(state.selected_index, 0);
        state.select_next();
        state.push_char('s');
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_replace_options_clamps_selection() {
        let mut state = palette();
        state.select_prev();
        state.replace_options(vec![option("Split Down", None), option("Split Left", None)]);
        assert_eq!(state.selected_index, 1);

        state.replace_options(Vec::new());
        assert_eq!(state.selected_index, 0);
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_no_matches() {
        let mut state = palette();
        state.push_char('#');
        assert!(state.matches.is_empty());
        assert!(state.selected().is_none());
        state.select_next();
        assert_eq!(state.selected_index, 0);
    }
}
