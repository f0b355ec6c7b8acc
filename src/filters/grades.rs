use super::FilterError;

/// An ordered grading scale, best grade first
#[derive(Debug, Clone, Copy)]
pub struct GradeScale {
    pub name: &'static str,
    pub grades: &'static [&'static str],
}

pub const COLOR: GradeScale = GradeScale {
    name: "color",
    grades: &[
        "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T", "U",
        "V", "W", "X", "Y", "Z",
    ],
};

pub const CLARITY: GradeScale = GradeScale {
    name: "clarity",
    grades: &[
        "FL", "IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "SI3", "I1", "I2", "I3",
    ],
};

pub const CUT: GradeScale = GradeScale {
    name: "cut",
    grades: &["EX", "VG", "G", "F", "P"],
};

impl GradeScale {
    fn position(&self, grade: &str) -> Result<usize, FilterError> {
        let wanted = grade.trim().to_uppercase();
        self.grades
            .iter()
            .position(|g| *g == wanted)
            .ok_or_else(|| FilterError::UnknownGrade {
                scale: self.name.to_string(),
                grade: grade.to_string(),
            })
    }

    /// Inclusive slice of the scale between two grades.
    ///
    /// A missing bound runs to the end of the scale and the bounds may be
    /// given in either order. Returns an empty list when both are `None`.
    pub fn expand(&self, from: Option<&str>, to: Option<&str>) -> Result<Vec<String>, FilterError> {
        let from = from.map(str::trim).filter(|s| !s.is_empty());
        let to = to.map(str::trim).filter(|s| !s.is_empty());
        if from.is_none() && to.is_none() {
            return Ok(Vec::new());
        }

        let start = match from {
            Some(grade) => self.position(grade)?,
            None => 0,
        };
        let end = match to {
            Some(grade) => self.position(grade)?,
            None => self.grades.len() - 1,
        };
        let (low, high) = if start <= end { (start, end) } else { (end, start) };

        Ok(self.grades[low..=high].iter().map(|g| g.to_string()).collect())
    }

    pub fn contains(&self, grade: &str) -> bool {
        self.position(grade).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_color_range() {
        let colors = COLOR.expand(Some("d"), Some("G")).unwrap();
        assert_eq!(colors, vec!["D", "E", "F", "G"]);
    }

    #[test]
    fn test_expand_reversed_bounds() {
        let clarity = CLARITY.expand(Some("VS2"), Some("VVS2")).unwrap();
        assert_eq!(clarity, vec!["VVS2", "VS1", "VS2"]);
    }

    #[test]
    fn test_expand_open_bounds() {
        assert_eq!(CUT.expand(None, Some("VG")).unwrap(), vec!["EX", "VG"]);
        assert_eq!(CUT.expand(Some("F"), None).unwrap(), vec!["F", "P"]);
        assert!(CUT.expand(None, Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn test_expand_unknown_grade() {
        let err = COLOR.expand(Some("A"), None).unwrap_err();
        assert_eq!(
            err,
            FilterError::UnknownGrade {
                scale: "color".into(),
                grade: "A".into()
            }
        );
    }
}
