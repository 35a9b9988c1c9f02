/// Farmacia o almacén, выбираемый в форме поиска
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warehouse {
    pub id: &'static str,
    pub label: &'static str,
}

pub const DEFAULT_WAREHOUSE_ID: &str = "4";

pub const WAREHOUSES: [Warehouse; 9] = [
    Warehouse { id: "2", label: "Almacen Especializado - Sismed" },
    Warehouse { id: "3", label: "Almacen Especializado - Donaciones" },
    Warehouse { id: "4", label: "Farmacia Principal - Sismed" },
    Warehouse { id: "5", label: "Farmacia Principal - Donaciones" },
    Warehouse { id: "6", label: "Farmacia Consultorios Externos - Sismed" },
    Warehouse { id: "7", label: "Farmacia Quirurgica - Sismed" },
    Warehouse { id: "8", label: "Farmacia Emergencia - Sismed" },
    Warehouse { id: "9", label: "Farmacia Emergencia - Donaciones" },
    Warehouse { id: "10", label: "Otros Servicios del Hospital" },
];

pub fn find(id: &str) -> Option<&'static Warehouse> {
    WAREHOUSES.iter().find(|w| w.id == id)
}

pub fn is_known(id: &str) -> bool {
    find(id).is_some()
}
