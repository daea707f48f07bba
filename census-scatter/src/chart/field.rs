use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The fields selectable on this axis, in display order.
    pub fn fields(self) -> [Field; 3] {
        match self {
            Axis::X => [Field::Age, Field::Poverty, Field::Income],
            Axis::Y => [Field::Smokes, Field::Obesity, Field::Healthcare],
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// The numeric columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    Poverty,
    Income,
    Obesity,
    Smokes,
    Healthcare,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Age,
        Field::Poverty,
        Field::Income,
        Field::Obesity,
        Field::Smokes,
        Field::Healthcare,
    ];

    /// Position of the field in a record's value array.
    pub const fn index(self) -> usize {
        match self {
            Field::Age => 0,
            Field::Poverty => 1,
            Field::Income => 2,
            Field::Obesity => 3,
            Field::Smokes => 4,
            Field::Healthcare => 5,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Field::Age | Field::Poverty | Field::Income => Axis::X,
            Field::Obesity | Field::Smokes | Field::Healthcare => Axis::Y,
        }
    }

    /// Column header in the input table.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Poverty => "poverty",
            Field::Income => "income",
            Field::Obesity => "obesity",
            Field::Smokes => "smokes",
            Field::Healthcare => "healthcare",
        }
    }

    /// Axis title shown on the clickable label.
    pub fn axis_label(self) -> &'static str {
        match self {
            Field::Age => "Median Age (years)",
            Field::Poverty => "In Poverty (%)",
            Field::Income => "Median Household Income ($)",
            Field::Obesity => "Obese (%)",
            Field::Smokes => "Smokes (%)",
            Field::Healthcare => "Lacks Healthcare (%)",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}
