//! Базовые компоненты акторов: Soldier, Faction, Category

use bevy::prelude::*;

/// Category label: по нему perception фильтрует кандидатов
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum Category {
    Soldier,
    /// Мишень, на которую солдаты прицеливаются
    Target,
    Scenery,
}

/// Архетип солдата (набор evaluators + idle клип)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Faction {
    American,
    German,
}

/// Солдат: персонаж с Brain + AnimationController
///
/// Автоматически добавляет Category::Soldier через Required Components.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Category = Category::Soldier)]
pub struct Soldier {
    pub faction: Faction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soldier_requires_category() {
        let mut world = World::new();
        let entity = world
            .spawn(Soldier {
                faction: Faction::German,
            })
            .id();

        assert_eq!(world.get::<Category>(entity), Some(&Category::Soldier));
    }
}
