//! Number formatting for pose tables

use glam::{Quat, Vec3};

/// Format a vector as `(x, y, z)` with four decimals
pub fn format_vec3(v: Vec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z)
}

/// Format a rotation scalar first, `[w, x, y, z]`
pub fn format_quat(q: Quat) -> String {
    format!("[{:.4}, {:.4}, {:.4}, {:.4}]", q.w, q.x, q.y, q.z)
}

/// Format an optional parent index, `-` for roots
pub fn format_parent(parent: Option<usize>) -> String {
    parent.map_or_else(|| "-".to_string(), |p| p.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_vec3(Vec3::new(1.0, -0.5, 0.0)), "(1.0000, -0.5000, 0.0000)");
        assert_eq!(format_quat(Quat::IDENTITY), "[1.0000, 0.0000, 0.0000, 0.0000]");
        assert_eq!(format_parent(None), "-");
        assert_eq!(format_parent(Some(3)), "3");
    }
}
