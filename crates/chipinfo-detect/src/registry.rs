//! Controller registry
//!
//! The registry owns one instance of every compiled-in decoder, in a fixed
//! order, and remembers which of them the user selected. Decoders are held
//! as a tagged variant so each keeps its own `Probe` type; a [`Candidate`]
//! pairs that probe with the decoder that produced it.

use crate::error::{DetectError, Result};
use chipinfo_core::chip::ChipDatabase;
use chipinfo_core::controller::{ControllerDriver, DriverParam};
use chipinfo_core::report::Report;
use chipinfo_core::scsi::ScsiTransport;
use std::path::Path;

#[cfg(feature = "alcor")]
use chipinfo_alcor::{Alcor, AlcorProbe};
#[cfg(feature = "dummy")]
use chipinfo_dummy::{Dummy, DummyProbe};
#[cfg(feature = "phison")]
use chipinfo_phison::{Phison, PhisonProbe};
#[cfg(feature = "smi")]
use chipinfo_smi::{Smi, SmiProbe};

/// Run `$body` against the decoder inside a [`Controller`]
macro_rules! dispatch {
    ($self:expr, $c:pat => $body:expr) => {
        match *$self {
            #[cfg(feature = "alcor")]
            Controller::Alcor($c) => $body,
            #[cfg(feature = "phison")]
            Controller::Phison($c) => $body,
            #[cfg(feature = "smi")]
            Controller::Smi($c) => $body,
            #[cfg(feature = "dummy")]
            Controller::Dummy($c) => $body,
        }
    };
}

/// A compiled-in controller decoder
#[derive(Debug, Clone)]
pub enum Controller {
    /// Alcor Micro
    #[cfg(feature = "alcor")]
    Alcor(Alcor),
    /// Phison
    #[cfg(feature = "phison")]
    Phison(Phison),
    /// Silicon Motion
    #[cfg(feature = "smi")]
    Smi(Smi),
    /// Example decoder
    #[cfg(feature = "dummy")]
    Dummy(Dummy),
}

/// Probe state of a shallow-detected device, per decoder
#[derive(Debug, Clone)]
pub enum Probe {
    /// Alcor Micro
    #[cfg(feature = "alcor")]
    Alcor(AlcorProbe),
    /// Phison
    #[cfg(feature = "phison")]
    Phison(PhisonProbe),
    /// Silicon Motion
    #[cfg(feature = "smi")]
    Smi(SmiProbe),
    /// Example decoder
    #[cfg(feature = "dummy")]
    Dummy(DummyProbe),
}

/// A decoder that matched the INQUIRY data, with its probe state
#[derive(Debug, Clone)]
pub struct Candidate {
    index: usize,
    name: &'static str,
    /// Probe state, filled in by deep detection
    pub probe: Probe,
}

impl Candidate {
    /// Name of the decoder that produced this candidate
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Controller {
    /// Decoder name
    pub fn name(&self) -> &'static str {
        dispatch!(self, ref c => c.name())
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        dispatch!(self, ref c => c.description())
    }

    /// Whether the decoder takes part in detection
    pub fn enabled(&self) -> bool {
        dispatch!(self, ref c => c.enabled())
    }

    /// Configuration keys the decoder accepts
    pub fn parameters(&self) -> &'static [DriverParam] {
        dispatch!(self, ref c => c.parameters())
    }

    /// Apply one `key=value` pair
    pub fn set_parameter(&mut self, key: &str, value: &str) -> chipinfo_core::Result<()> {
        dispatch!(self, ref mut c => c.set_parameter(key, value))
    }

    fn shallow_detect(&self, inquiry: &[u8], force: bool) -> Option<Probe> {
        match *self {
            #[cfg(feature = "alcor")]
            Controller::Alcor(ref c) => c.shallow_detect(inquiry, force).map(Probe::Alcor),
            #[cfg(feature = "phison")]
            Controller::Phison(ref c) => c.shallow_detect(inquiry, force).map(Probe::Phison),
            #[cfg(feature = "smi")]
            Controller::Smi(ref c) => c.shallow_detect(inquiry, force).map(Probe::Smi),
            #[cfg(feature = "dummy")]
            Controller::Dummy(ref c) => c.shallow_detect(inquiry, force).map(Probe::Dummy),
        }
    }

    // A probe always comes from the same variant, so the fallback arm only
    // exists to keep the match exhaustive.
    #[allow(unreachable_patterns)]
    fn deep_detect(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut Probe,
        force: bool,
    ) -> chipinfo_core::Result<bool> {
        match (self, probe) {
            #[cfg(feature = "alcor")]
            (Controller::Alcor(c), Probe::Alcor(p)) => c.deep_detect(dev, p, force),
            #[cfg(feature = "phison")]
            (Controller::Phison(c), Probe::Phison(p)) => c.deep_detect(dev, p, force),
            #[cfg(feature = "smi")]
            (Controller::Smi(c), Probe::Smi(p)) => c.deep_detect(dev, p, force),
            #[cfg(feature = "dummy")]
            (Controller::Dummy(c), Probe::Dummy(p)) => c.deep_detect(dev, p, force),
            _ => Ok(false),
        }
    }

    #[allow(unreachable_patterns)]
    fn process_device(
        &self,
        dev: &mut dyn ScsiTransport,
        probe: &mut Probe,
        report: &mut Report,
    ) -> chipinfo_core::Result<()> {
        match (self, probe) {
            #[cfg(feature = "alcor")]
            (Controller::Alcor(c), Probe::Alcor(p)) => c.process_device(dev, p, report),
            #[cfg(feature = "phison")]
            (Controller::Phison(c), Probe::Phison(p)) => c.process_device(dev, p, report),
            #[cfg(feature = "smi")]
            (Controller::Smi(c), Probe::Smi(p)) => c.process_device(dev, p, report),
            #[cfg(feature = "dummy")]
            (Controller::Dummy(c), Probe::Dummy(p)) => c.process_device(dev, p, report),
            _ => Ok(()),
        }
    }
}

/// Information about a controller decoder
pub struct ControllerInfo {
    /// Decoder name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Accepted configuration keys
    pub parameters: &'static [DriverParam],
}

/// Get information about all available controllers (enabled at compile time)
pub fn available_controllers() -> Vec<ControllerInfo> {
    ControllerRegistry::new()
        .controllers()
        .iter()
        .map(|c| ControllerInfo {
            name: c.name(),
            description: c.description(),
            parameters: c.parameters(),
        })
        .collect()
}

/// Generate a short list of controller names for CLI help
pub fn controller_names_short() -> String {
    let controllers = available_controllers();
    if controllers.is_empty() {
        return "none (recompile with features)".to_string();
    }
    let names: Vec<&str> = controllers.iter().map(|c| c.name).collect();
    names.join(", ")
}

/// The set of decoders a run uses
#[derive(Debug, Clone)]
pub struct ControllerRegistry {
    controllers: Vec<Controller>,
    selected: Vec<bool>,
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerRegistry {
    /// Registry with every compiled-in decoder selected
    #[allow(unused_mut, clippy::vec_init_then_push)]
    pub fn new() -> Self {
        let mut controllers = Vec::new();

        #[cfg(feature = "alcor")]
        controllers.push(Controller::Alcor(Alcor::new()));

        #[cfg(feature = "phison")]
        controllers.push(Controller::Phison(Phison::new()));

        #[cfg(feature = "smi")]
        controllers.push(Controller::Smi(Smi::new()));

        #[cfg(feature = "dummy")]
        controllers.push(Controller::Dummy(Dummy::new()));

        Self::with_controllers(controllers)
    }

    /// Registry over an explicit decoder list, all selected
    pub fn with_controllers(controllers: Vec<Controller>) -> Self {
        let selected = vec![true; controllers.len()];
        Self {
            controllers,
            selected,
        }
    }

    /// All decoders in registry order
    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    /// Decoder names in registry order
    pub fn names(&self) -> Vec<&'static str> {
        self.controllers.iter().map(Controller::name).collect()
    }

    /// Names of the decoders that will run
    pub fn selected_names(&self) -> Vec<&'static str> {
        self.controllers
            .iter()
            .zip(&self.selected)
            .filter(|(_, &on)| on)
            .map(|(c, _)| c.name())
            .collect()
    }

    fn find(&self, name: &str) -> Result<usize> {
        self.controllers
            .iter()
            .position(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| DetectError::UnknownController {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Restrict detection to the named decoders
    ///
    /// Names match case-insensitively; registry order is kept regardless of
    /// the order given.
    pub fn select<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let mut selected = vec![false; self.controllers.len()];
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            selected[self.find(name)?] = true;
        }
        self.selected = selected;
        Ok(())
    }

    /// Apply a `CTRL:key=value` option
    pub fn set_parameter(&mut self, option: &str) -> Result<()> {
        let (name, pair) = option
            .split_once(':')
            .ok_or_else(|| DetectError::InvalidOption(option.to_string()))?;
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| DetectError::InvalidOption(option.to_string()))?;

        let index = self.find(name)?;
        log::debug!("{}: {}={}", self.controllers[index].name(), key, value);
        self.controllers[index].set_parameter(key, value)?;
        Ok(())
    }

    /// Append chip definitions for the Alcor decoder
    ///
    /// Returns the number of definitions loaded, 0 if the decoder is not
    /// compiled in.
    pub fn load_chip_db(&mut self, path: &Path) -> Result<usize> {
        #[cfg(feature = "alcor")]
        for controller in &mut self.controllers {
            if let Controller::Alcor(alcor) = controller {
                return Ok(alcor.load_chip_db(path)?);
            }
        }
        log::warn!(
            "Alcor decoder not available, ignoring chip database {}",
            path.display()
        );
        Ok(0)
    }

    /// The Alcor chip database, if the decoder is compiled in
    pub fn chip_database(&self) -> Option<&ChipDatabase> {
        self.controllers.iter().find_map(|c| match *c {
            #[cfg(feature = "alcor")]
            Controller::Alcor(ref alcor) => Some(alcor.chip_database()),
            #[allow(unreachable_patterns)]
            _ => None,
        })
    }

    /// Offer the INQUIRY data to every selected decoder
    ///
    /// Pure: no commands are sent, so calling it twice yields the same
    /// candidates.
    pub fn shallow_detect(&self, inquiry: &[u8], force: bool) -> Vec<Candidate> {
        self.controllers
            .iter()
            .enumerate()
            .filter(|&(i, c)| self.selected[i] && c.enabled())
            .filter_map(|(index, c)| {
                c.shallow_detect(inquiry, force).map(|probe| Candidate {
                    index,
                    name: c.name(),
                    probe,
                })
            })
            .collect()
    }

    /// Confirm a candidate with its decoder's vendor command
    pub fn deep_detect(
        &self,
        dev: &mut dyn ScsiTransport,
        candidate: &mut Candidate,
        force: bool,
    ) -> Result<bool> {
        let controller = &self.controllers[candidate.index];
        Ok(controller.deep_detect(dev, &mut candidate.probe, force)?)
    }

    /// Let a confirmed candidate's decoder fill in the report
    pub fn process_device(
        &self,
        dev: &mut dyn ScsiTransport,
        candidate: &mut Candidate,
        report: &mut Report,
    ) -> Result<()> {
        let controller = &self.controllers[candidate.index];
        Ok(controller.process_device(dev, &mut candidate.probe, report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let registry = ControllerRegistry::new();
        assert_eq!(registry.names(), vec!["Alcor", "Phison", "SMI", "Dummy"]);
        assert_eq!(registry.selected_names(), registry.names());
        assert_eq!(controller_names_short(), "Alcor, Phison, SMI, Dummy");
    }

    #[test]
    fn test_select_subset() {
        let mut registry = ControllerRegistry::new();
        registry.select(&["smi", "ALCOR"]).unwrap();
        assert_eq!(registry.selected_names(), vec!["Alcor", "SMI"]);

        let err = registry.select(&["sandisk"]).unwrap_err();
        assert!(matches!(err, DetectError::UnknownController { .. }));
        // a failed selection leaves the previous one in place
        assert_eq!(registry.selected_names(), vec!["Alcor", "SMI"]);
    }

    #[test]
    fn test_set_parameter() {
        let mut registry = ControllerRegistry::new();
        registry.set_parameter("phison:tag=ABC").unwrap();
        registry.set_parameter("dummy:detect=yes").unwrap();

        assert!(matches!(
            registry.set_parameter("phison"),
            Err(DetectError::InvalidOption(_))
        ));
        assert!(matches!(
            registry.set_parameter("phison:tag"),
            Err(DetectError::InvalidOption(_))
        ));
        assert!(matches!(
            registry.set_parameter("smi:speed=1"),
            Err(DetectError::Core(chipinfo_core::Error::UnknownParameter { .. }))
        ));
        assert!(matches!(
            registry.set_parameter("dummy:detect=perhaps"),
            Err(DetectError::Core(chipinfo_core::Error::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn test_shallow_detect_is_pure() {
        let registry = ControllerRegistry::new();
        let inq = chipinfo_dummy::profiles::alcor_inquiry();

        let first: Vec<_> = registry
            .shallow_detect(&inq, false)
            .iter()
            .map(Candidate::name)
            .collect();
        let second: Vec<_> = registry
            .shallow_detect(&inq, false)
            .iter()
            .map(Candidate::name)
            .collect();
        assert_eq!(first, vec!["Alcor"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shallow_detect_respects_selection() {
        let mut registry = ControllerRegistry::new();
        registry.select(&["phison"]).unwrap();
        let inq = chipinfo_dummy::profiles::alcor_inquiry();
        assert!(registry.shallow_detect(&inq, false).is_empty());
    }

    #[test]
    fn test_force_claims_for_tagged_decoders() {
        let registry = ControllerRegistry::new();
        let names: Vec<_> = registry
            .shallow_detect(&[0u8; 0x38], true)
            .iter()
            .map(Candidate::name)
            .collect();
        // Dummy only claims with detect=yes, force or not
        assert_eq!(names, vec!["Alcor", "Phison", "SMI"]);
    }

    #[test]
    fn test_load_sample_chip_db() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../chips/alcor-extra.ron");
        let mut registry = ControllerRegistry::new();
        let before = registry.chip_database().unwrap().len();
        assert_eq!(registry.load_chip_db(&path).unwrap(), 0);
        assert_eq!(registry.chip_database().unwrap().len(), before);

        assert!(registry
            .load_chip_db(Path::new("/nonexistent/chips.ron"))
            .is_err());
    }

    #[test]
    fn test_chip_database_is_exposed() {
        let registry = ControllerRegistry::new();
        let db = registry.chip_database().unwrap();
        assert!(!db.find_by_chip(0xBD06).is_empty());
    }
}
