quantity!(Volts, "V");
quantity!(Amperes, "A");
quantity!(Ohms, "Ω");
