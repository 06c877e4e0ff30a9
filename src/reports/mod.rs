mod svg;
mod tables;

pub use self::svg::render as render_svg;
pub use self::tables::{layout as print_layout_table, score_list as print_score_list, write_layout_csv};
