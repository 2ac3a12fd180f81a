pub mod encode;
pub mod roll;
pub mod sheet;

use dk_core::{Props, StatTree, parse_share_string};

/// Decode a share string into a property map and tree.
fn load_character(share: Option<&str>) -> Result<(Props, StatTree), String> {
    let props = match share {
        Some(share) => parse_share_string(share).map_err(|e| e.to_string())?,
        None => Props::new(),
    };
    let tree = StatTree::from_props(&props);
    Ok((props, tree))
}
