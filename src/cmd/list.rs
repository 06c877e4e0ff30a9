use crate::reports;
use clap::Args;
use effort_picker::error::PickerResult;
use effort_picker::score::{list_entries, Score};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Score to mark as selected.
    #[arg(short, long, value_parser = super::parse_score)]
    pub selected: Option<Score>,
}

pub fn run(args: &ListArgs) -> PickerResult<()> {
    reports::print_score_list(&list_entries(), args.selected);
    Ok(())
}
