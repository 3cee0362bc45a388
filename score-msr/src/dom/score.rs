use crate::{
    error::MsrResult,
    ids::{IdGenerator, PartId},
    settings::MsrSettings,
};

use super::Part;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Score {
    settings: MsrSettings,
    parts: Vec<Part>,
}
impl Score {
    pub fn new(settings: MsrSettings) -> Self {
        Self {
            settings,
            parts: Vec::new(),
        }
    }
    pub fn settings(&self) -> &MsrSettings {
        &self.settings
    }
    pub fn parts(&self) -> &Vec<Part> {
        &self.parts
    }
    /// New part, with the score settings.
    pub fn add_part(
        &mut self,
        name: impl Into<String>,
        ids: &mut IdGenerator,
    ) -> &mut Part {
        let index = self.parts.len();
        self.parts
            .push(Part::new(ids, name, self.settings.clone()));
        &mut self.parts[index]
    }
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id() == id)
    }
    pub fn part_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.iter_mut().find(|p| p.id() == id)
    }
    pub fn finalize(&mut self, ids: &mut IdGenerator) -> MsrResult<()> {
        self.parts.iter_mut().try_for_each(|p| p.finalize(ids))
    }
}
