//! Fair-price tool state for the dashboard.
//!
//! Selector choices are never cached: each cycle re-derives the options from
//! the catalog, so a change upstream only has to clear what sits below it.

use crate::catalog::{Catalog, parse_mileage_input};
use crate::domain::{DEFAULT_TARGET_YEAR, Estimation};

/// Which form control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Make,
    Model,
    Year,
    Mileage,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Make,
        FormField::Model,
        FormField::Year,
        FormField::Mileage,
    ];

    pub fn index(self) -> usize {
        match self {
            FormField::Make => 0,
            FormField::Model => 1,
            FormField::Year => 2,
            FormField::Mileage => 3,
        }
    }

    pub fn prev(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }
}

/// The request an estimate was computed for, with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateResult {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: f64,
    pub estimation: Option<Estimation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FairPriceForm {
    pub focus: FormField,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub mileage: String,
    pub result: Option<EstimateResult>,
}

impl Default for FairPriceForm {
    fn default() -> Self {
        Self {
            focus: FormField::Make,
            make: None,
            model: None,
            year: None,
            mileage: String::new(),
            result: None,
        }
    }
}

impl FairPriceForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_make(&mut self, make: Option<String>) {
        if self.make != make {
            self.make = make;
            self.model = None;
            self.year = None;
            self.result = None;
        }
    }

    pub fn set_model(&mut self, model: Option<String>) {
        if self.model != model {
            self.model = model;
            self.year = None;
            self.result = None;
        }
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        if self.year != year {
            self.year = year;
            self.result = None;
        }
    }

    /// Step the focused selector through its current options.
    ///
    /// Returns `false` when the selector has nothing to offer yet.
    pub fn cycle(&mut self, catalog: &Catalog, delta: i32) -> bool {
        match self.focus {
            FormField::Make => {
                let options = catalog.makes();
                let next = step(&options, self.make.as_ref(), delta).cloned();
                let changed = next.is_some();
                self.set_make(next);
                changed
            }
            FormField::Model => {
                let Some(make) = &self.make else {
                    return false;
                };
                let options = catalog.models(make);
                let next = step(&options, self.model.as_ref(), delta).cloned();
                let changed = next.is_some();
                self.set_model(next);
                changed
            }
            FormField::Year => {
                let (Some(make), Some(model)) = (&self.make, &self.model) else {
                    return false;
                };
                let options = catalog.years(make, model);
                let next = step(&options, self.year.as_ref(), delta).copied();
                let changed = next.is_some();
                self.set_year(next);
                changed
            }
            FormField::Mileage => false,
        }
    }

    /// Accept the characters of `15,000`, `15000 mi` or `15,000 miles`.
    pub fn push_mileage(&mut self, c: char) -> bool {
        if c.is_ascii_digit() || matches!(c, ',' | '.' | ' ') || "milesMILES".contains(c) {
            self.mileage.push(c);
            self.result = None;
            true
        } else {
            false
        }
    }

    pub fn pop_mileage(&mut self) {
        self.mileage.pop();
        self.result = None;
    }

    /// Run the estimator for the current selection.
    ///
    /// A missing year falls back to the default target year and a missing
    /// model estimates across the whole make.
    pub fn submit(&mut self, catalog: &Catalog) -> Result<&EstimateResult, String> {
        let Some(make) = self.make.clone() else {
            return Err("Select a make first.".to_string());
        };
        let mileage = parse_mileage_input(&self.mileage).map_err(|e| e.message().to_string())?;
        let model = self.model.clone().unwrap_or_default();
        let year = self.year.unwrap_or(DEFAULT_TARGET_YEAR);

        let estimation = crate::estimate::estimate(&catalog.records, &make, &model, year, mileage);
        Ok(&*self.result.insert(EstimateResult {
            make,
            model,
            year,
            mileage,
            estimation,
        }))
    }
}

/// Next option after `current` (wrapping); the first or last when nothing is selected.
fn step<'a, T: PartialEq>(options: &'a [T], current: Option<&T>, delta: i32) -> Option<&'a T> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as i64;
    let idx = match current.and_then(|c| options.iter().position(|o| o == c)) {
        Some(i) => (i as i64 + i64::from(delta.signum())).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    options.get(idx as usize)
}
