//! Abstract Factory
//!
//! A furniture factory produces a whole family of matching pieces. The
//! assembly center only talks to the factory interface, so swapping the
//! factory swaps the entire family.

pub trait Sofa {
    fn assemble(&self) -> String;
}

pub trait Table {
    fn assemble(&self) -> String;
}

pub trait FurnitureFactory {
    fn material(&self) -> &'static str;
    fn create_sofa(&self) -> Box<dyn Sofa>;
    fn create_table(&self) -> Box<dyn Table>;
}

pub struct WoodSofa;
pub struct StoneSofa;
pub struct WoodTable;
pub struct StoneTable;

impl Sofa for WoodSofa {
    fn assemble(&self) -> String {
        "You had assembled wood sofa".to_string()
    }
}

impl Sofa for StoneSofa {
    fn assemble(&self) -> String {
        "You had assembled stone sofa".to_string()
    }
}

impl Table for WoodTable {
    fn assemble(&self) -> String {
        "You had assembled wood table".to_string()
    }
}

impl Table for StoneTable {
    fn assemble(&self) -> String {
        "You had assembled stone table".to_string()
    }
}

pub struct WoodFurnitureFactory;

impl FurnitureFactory for WoodFurnitureFactory {
    fn material(&self) -> &'static str {
        "wood"
    }

    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(WoodSofa)
    }

    fn create_table(&self) -> Box<dyn Table> {
        Box::new(WoodTable)
    }
}

pub struct StoneFurnitureFactory;

impl FurnitureFactory for StoneFurnitureFactory {
    fn material(&self) -> &'static str {
        "stone"
    }

    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(StoneSofa)
    }

    fn create_table(&self) -> Box<dyn Table> {
        Box::new(StoneTable)
    }
}

/// Even days get wood, odd days get stone.
pub fn factory_for_day(day_of_month: u32) -> Box<dyn FurnitureFactory> {
    let factory: Box<dyn FurnitureFactory> = if day_of_month % 2 == 0 {
        Box::new(WoodFurnitureFactory)
    } else {
        Box::new(StoneFurnitureFactory)
    };
    tracing::info!(day_of_month, material = factory.material(), "furniture factory chosen");
    factory
}

pub struct AssembleCenter {
    sofa: Box<dyn Sofa>,
    table: Box<dyn Table>,
}

impl AssembleCenter {
    pub fn new(factory: &dyn FurnitureFactory) -> Self {
        Self {
            sofa: factory.create_sofa(),
            table: factory.create_table(),
        }
    }

    /// Assembly report, sofa first.
    pub fn assemble(&self) -> Vec<String> {
        vec![self.sofa.assemble(), self.table.assemble()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_day_assembles_wood_family() {
        let factory = factory_for_day(14);
        assert_eq!(
            AssembleCenter::new(factory.as_ref()).assemble(),
            vec!["You had assembled wood sofa", "You had assembled wood table"]
        );
    }

    #[test]
    fn test_odd_day_assembles_stone_family() {
        let factory = factory_for_day(31);
        assert_eq!(factory.material(), "stone");
        assert_eq!(
            AssembleCenter::new(factory.as_ref()).assemble(),
            vec!["You had assembled stone sofa", "You had assembled stone table"]
        );
    }

    #[test]
    fn test_families_never_mix() {
        for day in 1..=31 {
            let factory = factory_for_day(day);
            let report = AssembleCenter::new(factory.as_ref()).assemble();
            assert!(report.iter().all(|line| line.contains(factory.material())));
        }
    }
}
